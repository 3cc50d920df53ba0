use action_core::builder::{call, delay, forever, interval, sequence, spawn, tween};
use action_core::{ActionContext, TaggedAction, TargetId};
use scheduler::ActionManager;

/// End-to-end scheduling scenario.
///
/// Simulates a small scene the way a game loop would drive it:
/// 1. A sprite flies in via a composed entrance animation
/// 2. A second sprite pulses on an endless tagged action
/// 3. A menu opens: every running target is paused via snapshot
/// 4. The menu closes: the snapshot is resumed and animations finish
/// 5. The endless pulse is cancelled by tag
#[derive(Clone, Debug, PartialEq)]
struct Sprite {
    x: f32,
    opacity: f32,
}

#[derive(Clone, Debug, PartialEq)]
struct Stage {
    sprites: Vec<Sprite>,
    banners: Vec<String>,
}

impl Stage {
    fn new(count: usize) -> Self {
        Self {
            sprites: vec![
                Sprite {
                    x: 0.0,
                    opacity: 1.0,
                };
                count
            ],
            banners: Vec::new(),
        }
    }
}

const PULSE_TAG: i32 = 3;

#[test]
fn scene_lifecycle_scenario() {
    let mut stage = Stage::new(3);
    let mut manager: ActionManager<Stage> = ActionManager::new();
    let (hero, pulse, backdrop) = (TargetId::new(0), TargetId::new(1), TargetId::new(2));

    // ================================================================
    // PHASE 1: entrance — delay, slide in, announce
    // ================================================================
    manager.add_action(
        interval(sequence(vec![
            delay(0.25),
            tween(1.0, |ctx: &mut ActionContext<'_, Stage>, t| {
                ctx.world.sprites[0].x = 100.0 * t
            }),
            call(|ctx: &mut ActionContext<'_, Stage>| {
                ctx.world.banners.push("hero arrived".into())
            }),
        ])),
        hero,
        false,
    );
    assert_eq!(manager.running_action_count(hero), 1);

    for _ in 0..5 {
        manager.update(&mut stage, 0.25);
    }
    assert_eq!(stage.sprites[0].x, 100.0);
    assert_eq!(stage.banners, vec!["hero arrived".to_string()]);
    // The finished sequence removed itself.
    assert_eq!(manager.running_action_count(hero), 0);

    // ================================================================
    // PHASE 2: an endless pulse and a backdrop fade, side by side
    // ================================================================
    manager.add_action(
        TaggedAction::from_boxed(forever(tween(
            0.5,
            |ctx: &mut ActionContext<'_, Stage>, t| ctx.world.sprites[1].opacity = 1.0 - t,
        )))
        .with_tag(PULSE_TAG),
        pulse,
        false,
    );
    manager.add_action(
        interval(spawn(vec![
            tween(2.0, |ctx: &mut ActionContext<'_, Stage>, t| {
                ctx.world.sprites[2].x = 50.0 * t
            }),
            tween(1.0, |ctx: &mut ActionContext<'_, Stage>, t| {
                ctx.world.sprites[2].opacity = t
            }),
        ])),
        backdrop,
        false,
    );

    manager.update(&mut stage, 0.25);
    assert_eq!(stage.sprites[1].opacity, 0.5);
    assert_eq!(stage.sprites[2].x, 6.25);
    assert_eq!(stage.sprites[2].opacity, 0.25);

    // ================================================================
    // PHASE 3: menu opens — checkpoint and freeze the whole table
    // ================================================================
    let mut snapshot = manager.pause_all_running_actions();
    snapshot.sort();
    assert_eq!(snapshot, vec![pulse, backdrop]);

    let frozen = stage.clone();
    for _ in 0..10 {
        manager.update(&mut stage, 0.25);
    }
    assert_eq!(stage, frozen);

    // ================================================================
    // PHASE 4: menu closes — resume exactly the checkpointed targets
    // ================================================================
    manager.resume_targets(&snapshot);
    for _ in 0..7 {
        manager.update(&mut stage, 0.25);
    }
    // 2.0 s of unpaused time total: the backdrop spawn has finished.
    assert_eq!(stage.sprites[2].x, 50.0);
    assert_eq!(stage.sprites[2].opacity, 1.0);
    assert_eq!(manager.running_action_count(backdrop), 0);

    // ================================================================
    // PHASE 5: cancel the endless pulse by tag
    // ================================================================
    assert_eq!(manager.running_action_count(pulse), 1);
    manager.remove_all_actions_by_tag(PULSE_TAG, pulse);
    assert_eq!(manager.running_action_count(pulse), 0);

    let settled = stage.clone();
    manager.update(&mut stage, 0.25);
    assert_eq!(stage, settled);
}

/// Pausing must only stall the clock: resuming and spending the same
/// unpaused time budget lands in the same end state as never pausing.
#[test]
fn pause_is_invisible_to_the_action_clock() {
    let run = |pause_mid_flight: bool| {
        let mut stage = Stage::new(1);
        let mut manager: ActionManager<Stage> = ActionManager::new();
        let target = TargetId::new(0);

        manager.add_action(
            interval(tween(2.0, |ctx: &mut ActionContext<'_, Stage>, t| {
                ctx.world.sprites[0].x = 200.0 * t
            })),
            target,
            false,
        );

        manager.update(&mut stage, 0.5);
        if pause_mid_flight {
            manager.pause_target(target);
            for _ in 0..4 {
                manager.update(&mut stage, 0.5);
            }
            manager.resume_target(target);
        }
        manager.update(&mut stage, 0.75);
        manager.update(&mut stage, 0.75);
        stage
    };

    let paused = run(true);
    let straight = run(false);
    assert_eq!(paused, straight);
    assert_eq!(paused.sprites[0].x, 200.0);
}

/// An action that rebuilds the scene mid-step: removes its own target and
/// schedules a follow-up on a fresh one. The tick must survive unscathed.
#[test]
fn actions_may_reschedule_the_world_mid_tick() {
    let mut stage = Stage::new(2);
    let mut manager: ActionManager<Stage> = ActionManager::new();
    let (old, new) = (TargetId::new(0), TargetId::new(1));

    manager.add_action(
        interval(call(move |ctx: &mut ActionContext<'_, Stage>| {
            let own = ctx.target();
            ctx.remove_all_actions_from_target(own);
            ctx.add_action(
                interval(tween(1.0, |c: &mut ActionContext<'_, Stage>, t| {
                    c.world.sprites[1].x = t
                })),
                new,
                false,
            );
        })),
        old,
        false,
    );
    // Scheduled behind the rescheduler; must never run.
    manager.add_action(
        interval(tween(1.0, |ctx: &mut ActionContext<'_, Stage>, t| {
            ctx.world.sprites[0].x = t
        })),
        old,
        false,
    );

    manager.update(&mut stage, 0.5);
    assert_eq!(stage.sprites[0].x, 0.0);
    assert_eq!(manager.running_action_count(old), 0);
    // The follow-up was created mid-tick and starts on the next pass.
    assert_eq!(manager.running_action_count(new), 1);
    assert_eq!(stage.sprites[1].x, 0.0);

    manager.update(&mut stage, 0.5);
    assert_eq!(stage.sprites[1].x, 0.5);
}

#[cfg(feature = "serde")]
#[test]
fn pause_snapshot_round_trips_through_json() {
    let mut manager: ActionManager<Stage> = ActionManager::new();
    manager.add_action(
        interval(delay(1.0)),
        TargetId::new(7),
        false,
    );

    let snapshot = manager.pause_all_running_actions();
    let json = serde_json::to_string(&snapshot).unwrap();
    let restored: Vec<TargetId> = serde_json::from_str(&json).unwrap();
    assert_eq!(restored, snapshot);
}
