use beatmarch::judge::{Judgment, Tier, TimingJudge, TimingWindows};
use beatmarch::rhythm::{BeatSlot, BeatSlots};

fn slots_with(current: bool, next: bool) -> BeatSlots {
    let mut slots = BeatSlots::new();
    if current {
        slots.claim(BeatSlot::Current);
    }
    if next {
        slots.claim(BeatSlot::Next);
    }
    slots
}

#[test]
fn test_perfect_window() {
    let judge = TimingJudge::default();
    let slots = BeatSlots::new();

    assert_eq!(judge.judge(0.0, &slots).tier, Tier::Perfect);
    assert_eq!(judge.judge(0.05, &slots).tier, Tier::Perfect);
    assert_eq!(judge.judge(0.96, &slots).tier, Tier::Perfect);
    assert_eq!(judge.judge(0.051, &slots).tier, Tier::Great);
}

#[test]
fn test_great_window() {
    let judge = TimingJudge::default();
    let slots = BeatSlots::new();

    assert_eq!(judge.judge(0.1, &slots).tier, Tier::Great);
    assert_eq!(judge.judge(0.12, &slots).tier, Tier::Great);
    assert_eq!(judge.judge(0.88, &slots).tier, Tier::Great);
}

#[test]
fn test_okay_window() {
    let judge = TimingJudge::default();
    let slots = BeatSlots::new();

    assert_eq!(judge.judge(0.2, &slots).tier, Tier::Okay);
    assert_eq!(judge.judge(0.22, &slots).tier, Tier::Okay);
    assert_eq!(judge.judge(0.78, &slots).tier, Tier::Okay);
}

#[test]
fn test_outside_window() {
    let judge = TimingJudge::default();
    let slots = BeatSlots::new();

    assert_eq!(judge.judge(0.3, &slots).tier, Tier::Miss);
    assert_eq!(judge.judge(0.5, &slots).tier, Tier::Miss);
    assert_eq!(judge.judge(0.7, &slots).tier, Tier::Miss);
}

#[test]
fn test_slot_choice_when_current_free() {
    let judge = TimingJudge::default();
    let slots = BeatSlots::new();

    assert_eq!(judge.judge(0.02, &slots).slot, Some(BeatSlot::Current));
    assert_eq!(judge.judge(0.98, &slots).slot, Some(BeatSlot::Next));
    // Equal distance to both boundaries favours the beat already running.
    let j = TimingJudge::new(TimingWindows::new(0.5, 0.25, 0.25).unwrap())
        .unwrap()
        .judge(0.5, &slots);
    assert_eq!(j.slot, Some(BeatSlot::Current));
}

#[test]
fn test_used_current_scores_next_boundary_only() {
    let judge = TimingJudge::default();
    let slots = slots_with(true, false);

    assert_eq!(
        judge.judge(0.02, &slots),
        Judgment {
            tier: Tier::Miss,
            slot: Some(BeatSlot::Next)
        }
    );
    assert_eq!(
        judge.judge(0.96, &slots),
        Judgment {
            tier: Tier::Perfect,
            slot: Some(BeatSlot::Next)
        }
    );
}

#[test]
fn test_both_used_is_unclaimed_miss() {
    let judge = TimingJudge::default();
    let slots = slots_with(true, true);
    for progress in [0.0, 0.5, 0.99] {
        assert_eq!(
            judge.judge(progress, &slots),
            Judgment {
                tier: Tier::Miss,
                slot: None
            }
        );
    }
}

#[test]
fn test_custom_windows() {
    let windows = TimingWindows::builder().perfect(0.2).build().unwrap();
    let judge = TimingJudge::new(windows).unwrap();
    assert_eq!(judge.judge(0.1, &BeatSlots::new()).tier, Tier::Perfect);
    assert_eq!(judge.windows().great, TimingWindows::DEFAULT_GREAT);
}

#[test]
fn test_invalid_windows_rejected() {
    assert!(TimingWindows::new(-0.1, 0.1, 0.1).is_err());
    assert!(TimingWindows::new(0.5, 0.5, 0.5).is_err());
    assert!(TimingWindows::new(f64::INFINITY, 0.0, 0.0).is_err());
    assert!(TimingWindows::new(0.0, 0.0, 0.0).is_ok());
}
