use super::*;
use chatlens_core::WordFrequency;
use std::cell::RefCell;
use std::rc::Rc;

type EventLog = Rc<RefCell<Vec<String>>>;

struct FakeChart {
    name: String,
    log: EventLog,
    released: bool,
}

impl FakeChart {
    fn create(name: &str, log: &EventLog) -> Self {
        log.borrow_mut().push(format!("create {name}"));
        Self {
            name: name.to_string(),
            log: Rc::clone(log),
            released: false,
        }
    }
}

impl RenderResource for FakeChart {
    fn release(&mut self) {
        assert!(!self.released, "{} released twice", self.name);
        self.released = true;
        self.log.borrow_mut().push(format!("release {}", self.name));
    }
}

fn events(log: &EventLog) -> Vec<String> {
    log.borrow().clone()
}

#[test]
fn replace_releases_previous_before_creating_next() {
    let log = EventLog::default();
    let mut session = VisualizationSession::new();
    session.replace(ChartSlot::Activity, || FakeChart::create("bar1", &log));
    session.replace(ChartSlot::Activity, || FakeChart::create("bar2", &log));

    assert_eq!(
        events(&log),
        ["create bar1", "release bar1", "create bar2"]
    );
    assert_eq!(session.get(ChartSlot::Activity).unwrap().name, "bar2");
}

#[test]
fn failed_creation_leaves_slot_empty() {
    let log = EventLog::default();
    let mut session = VisualizationSession::new();
    session.replace(ChartSlot::WordCloud, || FakeChart::create("cloud", &log));
    let res: Result<&mut FakeChart, &str> =
        session.try_replace(ChartSlot::WordCloud, || Err("canvas lost"));
    assert!(res.is_err());
    assert!(!session.is_active(ChartSlot::WordCloud));
    assert_eq!(events(&log), ["create cloud", "release cloud"]);
}

#[test]
fn clear_reports_whether_anything_was_held() {
    let log = EventLog::default();
    let mut session = VisualizationSession::new();
    assert!(!session.clear(ChartSlot::TopUsersPie));
    session.replace(ChartSlot::TopUsersPie, || FakeChart::create("pie", &log));
    assert!(session.clear(ChartSlot::TopUsersPie));
    assert!(!session.is_active(ChartSlot::TopUsersPie));
}

#[test]
fn dropping_the_session_releases_everything() {
    let log = EventLog::default();
    {
        let mut session = VisualizationSession::new();
        session.replace(ChartSlot::Activity, || FakeChart::create("bar", &log));
        session.replace(ChartSlot::WordCloud, || FakeChart::create("cloud", &log));
    }
    let events = events(&log);
    assert!(events.contains(&"release bar".to_string()));
    assert!(events.contains(&"release cloud".to_string()));
}

fn overall_results() -> AnalyticsResults {
    AnalyticsResults {
        num_messages: 10,
        top_users: vec!["a".to_string(), "b".to_string()],
        message_share: vec![6.0, 4.0],
        word_cloud: vec![WordFrequency::new("hi", 3.0)],
        ..Default::default()
    }
}

#[test]
fn plan_renders_top_users_only_for_overall() {
    let results = overall_results();
    let overall = RenderPlan::for_results(&results, &UserSelection::Overall);
    assert_eq!(overall.action(ChartSlot::Activity), SlotAction::Render);
    assert_eq!(overall.action(ChartSlot::TopUsersPie), SlotAction::Render);
    assert_eq!(overall.action(ChartSlot::TopUsersTable), SlotAction::Render);
    assert_eq!(overall.action(ChartSlot::WordCloud), SlotAction::Render);
    assert_eq!(overall.action(ChartSlot::EmojiPie), SlotAction::Clear);
    assert_eq!(overall.action(ChartSlot::DailyTimeline), SlotAction::Clear);

    let single = RenderPlan::for_results(&results, &UserSelection::User("a".to_string()));
    assert_eq!(single.action(ChartSlot::Activity), SlotAction::Render);
    assert_eq!(single.action(ChartSlot::TopUsersPie), SlotAction::Clear);
    assert_eq!(single.action(ChartSlot::TopUsersTable), SlotAction::Clear);
}

#[test]
fn plan_clears_top_users_when_backend_sent_none() {
    let results = AnalyticsResults::default();
    let plan = RenderPlan::for_results(&results, &UserSelection::Overall);
    assert_eq!(plan.action(ChartSlot::TopUsersPie), SlotAction::Clear);
    assert_eq!(plan.slots_to_render().collect::<Vec<_>>(), [ChartSlot::Activity]);
}

#[test]
fn applying_a_user_plan_tears_down_overall_only_charts() {
    let log = EventLog::default();
    let mut session = VisualizationSession::new();
    let results = overall_results();

    let overall = RenderPlan::for_results(&results, &UserSelection::Overall);
    session.apply(&overall, |slot| FakeChart::create(slot.as_str(), &log));
    assert!(session.is_active(ChartSlot::TopUsersPie));
    assert!(session.is_active(ChartSlot::TopUsersTable));

    let single = RenderPlan::for_results(&results, &UserSelection::User("b".to_string()));
    session.apply(&single, |slot| FakeChart::create(slot.as_str(), &log));
    assert!(!session.is_active(ChartSlot::TopUsersPie));
    assert!(!session.is_active(ChartSlot::TopUsersTable));
    assert!(session.is_active(ChartSlot::Activity));
    assert!(session.is_active(ChartSlot::WordCloud));

    let events = events(&log);
    let released = events.iter().filter(|e| e.starts_with("release")).count();
    // activity + word cloud replaced, pie + table cleared.
    assert_eq!(released, 4);
}

#[test]
fn plan_serializes_slots_by_name() {
    let plan = RenderPlan::for_results(&overall_results(), &UserSelection::Overall);
    let json = serde_json::to_value(&plan).unwrap();
    assert_eq!(json["actions"]["activity"], "render");
    assert_eq!(json["actions"]["emojiPie"], "clear");
}
