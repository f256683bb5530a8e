use assert_cmd::cargo;
use rstest::rstest;

fn blocks(stdout: &str) -> Vec<Vec<&str>> {
    let lines: Vec<&str> = stdout.lines().collect();
    lines.chunks(3).map(|block| block.to_vec()).collect()
}

#[rstest]
#[case::no_args(vec![])]
#[case::ignored_args(vec!["--verbose", "extra", "-x"])]
fn test_cli_reports_stack(#[case] args: Vec<&str>) -> Result<(), Box<dyn std::error::Error>> {
    let mut cmd = cargo::cargo_bin_cmd!("frame-report");

    let assert = cmd.args(args).env_remove("RUST_LOG").assert();
    let output = assert.success().code(0).get_output().clone();
    let stdout = String::from_utf8(output.stdout)?;

    let blocks = blocks(&stdout);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0][0], "frame #0:");
    assert!(blocks[0][1].starts_with("  frame_report::report::report_stack at "));
    assert_eq!(blocks[0][2], "");
    assert_eq!(blocks[1][0], "frame #1:");
    assert!(blocks[1][1].starts_with("  frame_report::main at "));
    assert_eq!(blocks[1][2], "");
    assert!(stdout.ends_with("\n\n"));

    Ok(())
}
