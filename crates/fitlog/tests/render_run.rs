//! End-to-end rendering through the public API.

#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

use fitlog::{
    FitlogResult, Palette, RenderConfig, RenderRun, ReportAssets, ReportSink, ResetPolicy,
    TestListener, TestPage, TestSummary, TranscriptPipeline, TranscriptSink, WikiFormatter,
    WikiTextColorizer,
};
use std::io::Cursor;
use tempfile::TempDir;

const CHUNKS: [&str; 3] = [
    "<h1>Step 1</h1>",
    r#"<div class="hidden closed">secret</div>"#,
    r#"<span class="pass">ok</span>"#,
];

fn transcript_of(run: &RenderRun<Vec<u8>>) -> String {
    String::from_utf8_lossy(run.transcript().get_ref()).into_owned()
}

// ============================================================================
// Transcript and report from the same stream
// ============================================================================

#[test]
fn test_three_chunks_colored_transcript_and_verbatim_report() {
    let mut run = RenderRun::new(Vec::new(), &RenderConfig::new()).unwrap();
    let page = TestPage::new("MyTest.Suite.CaseA");
    run.test_started(&page);
    for chunk in CHUNKS {
        run.output_chunk(chunk);
    }
    run.test_complete(&page, &TestSummary::new(3, 1, 0, 0));

    let transcript = transcript_of(&run);
    let heading = Palette::colored().paint(fitlog::Tone::Heading, "Step 1\r\n");
    let ok = Palette::colored().paint(fitlog::Tone::Pass, "ok");
    assert!(transcript.contains(&heading));
    assert!(transcript.contains(&ok));
    assert!(!transcript.contains("secret"));
    assert!(transcript.contains("3 right, 1 wrong, 0 ignored, 0 exceptions"));

    let reports = run.finish();
    assert_eq!(reports.len(), 1);
    for chunk in CHUNKS {
        assert!(reports[0].html.contains(chunk), "missing {chunk}");
    }
    assert!(reports[0].html.starts_with("<html>\r\n<head>\r\n<style>\r\n"));
    assert!(reports[0].html.ends_with("</body></html>"));
}

#[test]
fn test_abort_mid_test_closes_both_outputs() {
    let mut run = RenderRun::new(Vec::new(), &RenderConfig::new().with_color(false)).unwrap();
    run.test_started(&TestPage::new("S.Crash"));
    run.output_chunk("<p>halfway</p>");
    run.abort("engine stopped");

    let rule = "-".repeat(fitlog::sink::SUMMARY_RULE_WIDTH);
    let transcript = transcript_of(&run);
    assert!(transcript.trim_end().ends_with(&rule));
    assert!(transcript.contains("aborted: engine stopped"));

    let reports = run.finish();
    assert_eq!(reports.len(), 1);
    assert!(reports[0].html.contains("<p>halfway</p>"));
    assert!(reports[0].html.ends_with("</body></html>"));
}

// ============================================================================
// Wiki formatter fail-open
// ============================================================================

fn failing(_: &str) -> FitlogResult<String> {
    Err(fitlog::FitlogError::formatter("boom"))
}

fn panicking(_: &str) -> FitlogResult<String> {
    panic!("formatter bug")
}

fn render_with(formatter: Box<dyn WikiFormatter>, chunk: &str) -> String {
    let mut sink = TranscriptSink::with_pipeline(
        Vec::new(),
        TranscriptPipeline::new(Palette::plain(), formatter),
        Palette::plain(),
        ResetPolicy::Persist,
    );
    sink.output_chunk(chunk);
    String::from_utf8(sink.get_ref().clone()).unwrap()
}

#[test]
fn test_formatter_failure_matches_unformatted_output() {
    let chunk = r#"<table><tr><td>check</td><td class="fail">no</td></tr><tr><td>a</td><td>b</td></tr></table>"#;
    let baseline = render_with(Box::new(fitlog::PassThrough), chunk);
    assert_eq!(render_with(Box::new(failing), chunk), baseline);
    assert_eq!(render_with(Box::new(panicking), chunk), baseline);
    assert!(baseline.contains("no"));
}

#[test]
fn test_colorizer_reports_formatter_name() {
    let colorizer = WikiTextColorizer::new(Box::new(failing), Palette::plain());
    assert_eq!(colorizer.formatter_name(), "custom");
}

// ============================================================================
// Replay with images and report files
// ============================================================================

#[test]
fn test_replay_writes_reports_with_embedded_images() {
    let root = TempDir::new().unwrap();
    std::fs::create_dir_all(root.path().join("files")).unwrap();
    std::fs::write(root.path().join("files/shot.png"), b"png-bytes").unwrap();
    let out_dir = root.path().join("reports");

    let config = RenderConfig::new()
        .with_color(false)
        .with_assets_root(root.path())
        .with_report_dir(&out_dir);
    let recording = [
        serde_json::json!({"event": "test_started", "page": {"full_path": "Suite.Shots"}}),
        serde_json::json!({"event": "output_chunk", "chunk": "<a href=\"files/shot.png\"><img src=\"files/shot.png\"/></a>"}),
        serde_json::json!({
            "event": "test_complete",
            "page": {"full_path": "Suite.Shots"},
            "summary": {"right": 1, "wrong": 0, "ignores": 0, "exceptions": 0}
        }),
    ]
    .iter()
    .map(ToString::to_string)
    .collect::<Vec<_>>()
    .join("\n");

    let mut run = RenderRun::new(Vec::new(), &config).unwrap();
    let stats = run.replay(Cursor::new(recording)).unwrap();
    assert_eq!(stats.tests_completed, 1);

    let reports = run.finish();
    let written = std::fs::read_to_string(out_dir.join("Suite.Shots.html")).unwrap();
    assert_eq!(written, reports[0].html);
    assert!(written.contains("base64,cG5nLWJ5dGVz\""));
    assert!(!written.contains("<a href"));
}

#[test]
fn test_asset_override_reaches_report() {
    let dir = TempDir::new().unwrap();
    let css = dir.path().join("plain.css");
    std::fs::write(&css, "h1 { font-size: 1em; }").unwrap();
    let config = RenderConfig::new().with_stylesheet(&css);
    let mut sink = ReportSink::from_config(&config).unwrap();
    let page = TestPage::new("S.Styled");
    sink.test_started(&page);
    sink.test_complete(&page, &TestSummary::default());
    let report = sink.take_report().unwrap();
    assert!(report.html.contains("<style>\r\nh1 { font-size: 1em; }\r\n</style>"));
    assert!(report.html.contains(ReportAssets::bundled().script()));
}
