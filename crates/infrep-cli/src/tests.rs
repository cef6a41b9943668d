use super::*;

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["infrep"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_about_command() {
    let cli = Cli::try_parse_from(["infrep", "about"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::About)));
}

#[test]
fn report_defaults_to_influencer_grouping() {
    let cli = Cli::try_parse_from(["infrep", "report", "data.xlsx"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            ref file,
            by: Grouping::Influencer,
            format: None,
            raw: false,
        }) if file.as_os_str() == "data.xlsx"
    ));
}

#[test]
fn report_accepts_grouping_format_and_raw() {
    let cli = Cli::try_parse_from([
        "infrep",
        "report",
        "data.xlsx",
        "--by",
        "influencer-month",
        "--format",
        "json",
        "--raw",
    ])
    .unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            by: Grouping::InfluencerMonth,
            format: Some(OutputFormat::Json),
            raw: true,
            ..
        })
    ));
}

#[test]
fn report_accepts_md_alias() {
    let cli =
        Cli::try_parse_from(["infrep", "report", "data.xlsx", "--format", "md"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Report {
            format: Some(OutputFormat::Markdown),
            ..
        })
    ));
}

#[test]
fn report_rejects_unknown_grouping() {
    let result = Cli::try_parse_from(["infrep", "report", "data.xlsx", "--by", "week"]);
    assert!(result.is_err());
}

#[test]
fn report_rejects_unknown_format() {
    let result = Cli::try_parse_from(["infrep", "report", "data.xlsx", "--format", "csv"]);
    assert!(result.is_err());
}

#[test]
fn report_requires_file() {
    assert!(Cli::try_parse_from(["infrep", "report"]).is_err());
}

#[test]
fn export_requires_out() {
    assert!(Cli::try_parse_from(["infrep", "export", "data.xlsx"]).is_err());

    let cli =
        Cli::try_parse_from(["infrep", "export", "data.xlsx", "--out", "report.xlsx"]).unwrap();
    assert!(matches!(
        cli.command,
        Some(Commands::Export { ref out, .. }) if out.as_os_str() == "report.xlsx"
    ));
}

#[test]
fn grouping_maps_to_dimensions() {
    assert_eq!(Grouping::Influencer.dimensions(), &[Dimension::Influencer]);
    assert_eq!(Grouping::Month.dimensions(), &[Dimension::Month]);
    assert_eq!(
        Grouping::InfluencerMonth.dimensions(),
        &[Dimension::Influencer, Dimension::Month]
    );
}

#[test]
fn about_text_explains_sheets_and_metrics() {
    assert!(about::ABOUT.contains("Posts"));
    assert!(about::ABOUT.contains("Conversions"));
    assert!(about::ABOUT.contains("\"influencer\""));
    assert!(about::ABOUT.contains("Cost per acquisition"));
    assert!(about::ABOUT.contains("conversion rate is 3%"));
}
