use cucumber_teamcity::{
    summary::{Plain, SummaryFormatter as _, TeamCity},
    RunSummary, StatementType, Status, StatusSummary, SummaryFormat,
};

fn all_statuses(counts: [usize; 5]) -> StatusSummary {
    Status::ALL.into_iter().zip(counts).collect()
}

#[test]
fn scenarios_suppress_untested_at_zero() {
    let summary = all_statuses([3, 0, 0, 0, 0]);

    assert_eq!(
        TeamCity.format_summary(StatementType::Scenario, &summary),
        "3 scenarios passed, 0 scenarios failed, 0 scenarios skipped, \
         0 scenarios undefined\n\
         ##teamcity[setParameter name='env.SCENARIOS_PASSED' value='3']\n\
         ##teamcity[setParameter name='env.SCENARIOS_FAILED' value='0']\n\
         ##teamcity[setParameter name='env.SCENARIOS_SKIPPED' value='0']\n\
         ##teamcity[setParameter name='env.SCENARIOS_UNDEFINED' value='0']\n",
    );
}

#[test]
fn untested_is_rendered_once_counted() {
    let summary = all_statuses([0, 0, 0, 0, 2]);
    let rendered = TeamCity.format_summary(StatementType::Feature, &summary);

    assert!(rendered.starts_with(
        "0 features passed, 0 features failed, 0 features skipped, \
         0 features undefined, 2 features untested\n",
    ));
    assert!(rendered.ends_with(
        "##teamcity[setParameter name='env.FEATURES_UNTESTED' value='2']\n",
    ));
}

#[test]
fn single_step_is_singular_but_parameter_is_plural() {
    let summary = StatusSummary::new().with(Status::Passed, 1);

    assert_eq!(
        TeamCity.format_summary(StatementType::Step, &summary),
        "1 step passed\n\
         ##teamcity[setParameter name='env.STEPS_PASSED' value='1']\n",
    );
}

#[test]
fn plain_renders_human_line_only() {
    let summary = StatusSummary::new()
        .with(Status::Passed, 2)
        .with(Status::Failed, 1);

    assert_eq!(
        Plain.format_summary(StatementType::Scenario, &summary),
        "2 scenarios passed, 1 scenario failed\n",
    );
}

#[test]
fn chosen_format_renders_whole_run() {
    let run = RunSummary::new();

    let plain = SummaryFormat::Plain.format_run(&run);
    let teamcity = SummaryFormat::TeamCity.format_run(&run);

    assert_eq!(plain.lines().count(), 3);
    assert_eq!(teamcity.lines().count(), 3 + 3 + 3 + 4);
    assert!(teamcity.starts_with("0 features passed"));
}
