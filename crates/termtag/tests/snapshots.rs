use futures_util::TryStreamExt;
use insta::assert_snapshot;
use termtag::markup::parse;
use termtag::{OutputMode, Render, RenderOptions};

const STATUS_REPORT: &str = concat!(
    "[bold]Build[/bold] [green]passed[/green][erase end-of-line]\n",
    "[move relative x=2 y=0][dim]3 warnings, [yellow]1 flaky[/yellow][/dim]\n",
    "[color r=0.2 g=0.4 b=1 background]deploy[/color]",
);

async fn render(markup: &str, mode: OutputMode) -> String {
    let fragments: Vec<String> = Render::from_tokens(parse(markup).unwrap())
        .with_options(RenderOptions::default().with_mode(mode))
        .into_strings()
        .try_collect()
        .await
        .unwrap();
    fragments.concat()
}

#[tokio::test]
async fn test_snapshots_debug_output() {
    let output = render(STATUS_REPORT, OutputMode::TermDebug).await;
    assert_snapshot!("debug_status_report", output);
}

#[tokio::test]
async fn test_snapshots_text_output() {
    let output = render(STATUS_REPORT, OutputMode::Text).await;
    assert_snapshot!("text_status_report", output);
}
