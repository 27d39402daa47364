mod common;

use fight_core::{
    CombatConfig, CombatEnv, CombatEvent, Contact, EntityState, HitData, HitResult, Launch, Phase,
    SkillId, Tick,
};

use common::{Host, arena, frames, phase_letter, skill, state_of};

#[test]
fn skill_walks_startup_active_recovery_in_exact_ticks() {
    let (mut arena, a, _) = arena(
        vec![skill(1, frames(3, 2, 5)).build().unwrap()],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    assert_eq!(
        arena.execute_skill(a, &[SkillId(1)], &env),
        Ok(Some(Launch::Started(SkillId(1))))
    );

    let mut trace = String::from(phase_letter(state_of(&arena, a)));
    let mut settled = Vec::new();
    for _ in 0..10 {
        for event in arena.tick(&env) {
            if let CombatEvent::Settled { tick, hit } = event {
                settled.push((tick.0, hit));
            }
        }
        trace.push(phase_letter(state_of(&arena, a)));
    }

    // Launch, ticks 1-2 startup, 3-4 active, 5-9 recovery, idle after 10.
    assert_eq!(trace, "SSSAARRRRRI");
    assert_eq!(
        settled,
        vec![(
            10,
            HitData {
                attacker: a,
                attacked: None,
                skill: SkillId(1),
                hit_result: HitResult::Whiffed,
            }
        )]
    );
    assert!(state_of(&arena, a).contains(EntityState::IDLE));
    assert!(arena.combatant(a).unwrap().execution().is_none());
}

#[test]
fn zero_startup_is_active_from_the_launch_frame() {
    let (mut arena, a, _) = arena(
        vec![
            skill(1, frames(0, 1, 1)).build().unwrap(),
            skill(2, frames(3, 2, 5)).build().unwrap(),
        ],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    let mut trace = String::from(phase_letter(state_of(&arena, a)));
    assert!(arena.combatant(a).unwrap().is_negative());
    assert_eq!(
        arena.combatant(a).unwrap().execution().unwrap().phase(),
        Phase::Active
    );
    // Already committed: a plain skill cannot replace it.
    assert_eq!(arena.execute_skill(a, &[SkillId(2)], &env), Ok(None));

    let mut settled = Vec::new();
    for _ in 0..2 {
        for event in arena.tick(&env) {
            if let CombatEvent::Settled { tick, hit } = event {
                settled.push((tick.0, hit.skill));
            }
        }
        trace.push(phase_letter(state_of(&arena, a)));
    }

    assert_eq!(trace, "ARI");
    assert_eq!(settled, vec![(2, SkillId(1))]);
}

#[test]
fn zero_startup_strikes_on_the_launch_frame() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![skill(1, frames(0, 1, 1).hit_stun(5)).build().unwrap()],
        CombatConfig::default(),
    );
    host.hitbox.touch(a, Contact::new(b));

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    let defender = arena.combatant(b).unwrap();
    assert!(defender.state().is_state(EntityState::HITSTUN));
    assert_eq!(defender.counters().hit_stun, 5);

    let events = arena.tick(&env);
    assert_eq!(
        events
            .iter()
            .filter(|e| matches!(e, CombatEvent::Contact { .. }))
            .collect::<Vec<_>>(),
        vec![&CombatEvent::Contact {
            tick: Tick(0),
            attacker: a,
            defender: b,
            skill: SkillId(1),
            result: HitResult::Contact,
            stun: 5,
        }]
    );
    assert_eq!(arena.combatant(b).unwrap().counters().hit_stun, 4);
}

#[test]
fn hit_stun_counts_down_once_per_tick() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![skill(1, frames(3, 2, 5).hit_stun(12)).build().unwrap()],
        CombatConfig::default(),
    );
    host.hitbox.touch(a, Contact::new(b));

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.tick(&env);
    arena.tick(&env);
    let events = arena.tick(&env);

    assert!(events.contains(&CombatEvent::Contact {
        tick: Tick(3),
        attacker: a,
        defender: b,
        skill: SkillId(1),
        result: HitResult::Contact,
        stun: 12,
    }));
    let defender = arena.combatant(b).unwrap();
    assert_eq!(defender.counters().hit_stun, 12);
    assert!(defender.state().is_state(EntityState::HITSTUN));
    assert!(!defender.state().is_state(EntityState::IDLE));

    for elapsed in 1..=12 {
        arena.tick(&env);
        let defender = arena.combatant(b).unwrap();
        assert_eq!(defender.counters().hit_stun, 12 - elapsed);
        assert_eq!(
            defender.state().is_state(EntityState::HITSTUN),
            elapsed < 12,
            "tick {}",
            arena.now()
        );
    }

    // Released on tick 15, back to neutral.
    assert_eq!(arena.now().0, 15);
    assert!(state_of(&arena, b).contains(EntityState::IDLE));
}

#[test]
fn hit_during_startup_is_a_counter_and_cancels_the_victim() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![
            skill(1, frames(3, 2, 5).hit_stun(12)).build().unwrap(),
            skill(2, frames(5, 2, 5)).build().unwrap(),
        ],
        CombatConfig::default(),
    );
    host.hitbox.touch(a, Contact::new(b));

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.execute_skill(b, &[SkillId(2)], &env).unwrap();
    arena.tick(&env);
    arena.tick(&env);
    let events = arena.tick(&env);

    assert!(events.contains(&CombatEvent::Settled {
        tick: Tick(3),
        hit: HitData {
            attacker: b,
            attacked: None,
            skill: SkillId(2),
            hit_result: HitResult::Canceled,
        },
    }));
    // 12 * 1.628, rounded down.
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::Contact { result: HitResult::Counter, stun: 19, .. }
    )));

    let defender = arena.combatant(b).unwrap();
    assert!(defender.execution().is_none());
    assert!(!defender.state().get().intersects(EntityState::SKILL_PHASES));
    assert_eq!(defender.counter(), Some(a));
    assert_eq!(defender.counters().hit_stun, 19);

    let attacker = arena.combatant(a).unwrap();
    assert_eq!(attacker.execution().unwrap().result(), HitResult::Counter);
    assert_eq!(attacker.last_landed(), Some(SkillId(1)));
}

#[test]
fn crouching_defender_takes_scaled_stun() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![skill(1, frames(1, 1, 1).hit_stun(20)).build().unwrap()],
        CombatConfig::default(),
    );
    host.hitbox.touch(a, Contact::new(b));
    arena
        .combatant_mut(b)
        .unwrap()
        .state_mut()
        .add_state(EntityState::CROUCH);

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.tick(&env);

    assert_eq!(arena.combatant(b).unwrap().counters().hit_stun, 25);
}

#[test]
fn external_hitstun_abandons_recovery_next_tick() {
    let (mut arena, a, _) = arena(
        vec![skill(1, frames(1, 1, 20)).build().unwrap()],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    for _ in 0..4 {
        arena.tick(&env);
    }
    // Second tick of recovery.
    assert_eq!(phase_letter(state_of(&arena, a)), 'R');
    assert_eq!(
        arena.combatant(a).unwrap().execution().unwrap().phase(),
        Phase::Recovery
    );

    arena
        .combatant_mut(a)
        .unwrap()
        .state_mut()
        .add_state(EntityState::HITSTUN);
    let events = arena.tick(&env);

    let state = state_of(&arena, a);
    assert!(!state.intersects(EntityState::SKILL_PHASES));
    assert!(state.contains(EntityState::HITSTUN));
    assert!(arena.combatant(a).unwrap().execution().is_none());
    assert_eq!(
        events,
        vec![CombatEvent::Settled {
            tick: Tick(5),
            hit: HitData {
                attacker: a,
                attacked: None,
                skill: SkillId(1),
                hit_result: HitResult::Canceled,
            },
        }]
    );

    // Nothing lingers afterwards.
    for _ in 0..20 {
        assert!(arena.tick(&env).is_empty());
        assert!(!state_of(&arena, a).intersects(EntityState::SKILL_PHASES));
    }
}

#[test]
fn one_tick_hit_stun_still_abandons_recovery() {
    let (mut arena, a, _) = arena(
        vec![skill(1, frames(1, 1, 20)).build().unwrap()],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    for _ in 0..4 {
        arena.tick(&env);
    }
    assert_eq!(phase_letter(state_of(&arena, a)), 'R');

    arena.combatant_mut(a).unwrap().set_hit_stun(1);
    let events = arena.tick(&env);

    // The stun ran out before the execution stepped; it is abandoned anyway.
    assert_eq!(
        events,
        vec![CombatEvent::Settled {
            tick: Tick(5),
            hit: HitData {
                attacker: a,
                attacked: None,
                skill: SkillId(1),
                hit_result: HitResult::Canceled,
            },
        }]
    );
    let combatant = arena.combatant(a).unwrap();
    assert!(combatant.execution().is_none());
    assert_eq!(combatant.state().get(), EntityState::IDLE);
}

#[test]
fn zero_hit_stun_releases_the_combatant() {
    let (mut arena, a, _) = arena(
        vec![skill(1, frames(1, 1, 1)).build().unwrap()],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    let combatant = arena.combatant_mut(a).unwrap();
    combatant.set_hit_stun(8);
    assert!(combatant.was_attacked());
    combatant.set_hit_stun(0);
    assert!(!combatant.state().is_state(EntityState::HITSTUN));
    assert!(combatant.state().is_state(EntityState::IDLE));
    assert!(!combatant.is_negative());

    assert_eq!(
        arena.execute_skill(a, &[SkillId(1)], &env),
        Ok(Some(Launch::Started(SkillId(1))))
    );
}

#[test]
fn forced_state_rejects_the_phase_wait() {
    let (mut arena, a, _) = arena(
        vec![skill(1, frames(4, 2, 4)).build().unwrap()],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.tick(&env);
    arena
        .combatant_mut(a)
        .unwrap()
        .state_mut()
        .force_state(EntityState::CROUCH);

    let events = arena.tick(&env);
    assert!(matches!(
        events.as_slice(),
        [CombatEvent::Settled { hit: HitData { hit_result: HitResult::Canceled, .. }, .. }]
    ));
    assert_eq!(state_of(&arena, a), EntityState::CROUCH | EntityState::IDLE);
}

#[test]
fn effect_that_interrupts_withdraws_silently() {
    let (mut arena, a, _) = arena(
        vec![
            skill(1, frames(3, 2, 5).effect(2, |combatant, _| {
                combatant.interrupt(&CombatEnv::empty());
            }))
            .build()
            .unwrap(),
        ],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    assert!(arena.tick(&env).is_empty());
    assert!(arena.tick(&env).is_empty());

    let combatant = arena.combatant(a).unwrap();
    assert!(combatant.execution().is_none());
    assert!(combatant.state().is_state(EntityState::IDLE));
    assert!(!combatant.state().get().intersects(EntityState::SKILL_PHASES));
}

#[test]
fn effects_fire_at_their_offsets() {
    let (mut arena, a, _) = arena(
        vec![
            skill(
                1,
                frames(2, 1, 2)
                    .effect(0, |combatant, _| combatant.counters_mut().stamina -= 10)
                    .effect(3, |combatant, _| combatant.counters_mut().stamina -= 5),
            )
            .build()
            .unwrap(),
        ],
        CombatConfig::default(),
    );
    let env = CombatEnv::empty();

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    assert_eq!(arena.combatant(a).unwrap().counters().stamina, 90);

    let mut stamina = Vec::new();
    for _ in 0..5 {
        arena.tick(&env);
        stamina.push(arena.combatant(a).unwrap().counters().stamina);
    }
    assert_eq!(stamina, vec![90, 90, 85, 85, 85]);
}

#[test]
fn hit_stop_freezes_both_parties() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![skill(1, frames(1, 2, 2).hit_stun(10)).build().unwrap()],
        CombatConfig::default().with_contact_hit_stop(3),
    );
    host.hitbox.touch(a, Contact::new(b));

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.tick(&env);
    assert_eq!(arena.combatant(a).unwrap().counters().hit_stop, 3);
    assert_eq!(arena.combatant(b).unwrap().counters().hit_stop, 3);

    for _ in 0..3 {
        arena.tick(&env);
        assert_eq!(phase_letter(state_of(&arena, a)), 'A');
        assert_eq!(arena.combatant(b).unwrap().counters().hit_stun, 10);
    }

    arena.tick(&env);
    assert_eq!(phase_letter(state_of(&arena, a)), 'A');
    assert_eq!(arena.combatant(b).unwrap().counters().hit_stun, 9);
    arena.tick(&env);
    assert_eq!(phase_letter(state_of(&arena, a)), 'R');
}

#[test]
fn round_reset_restores_defaults_but_keeps_gauge() {
    let host = Host::new();
    let env = host.env();
    let (mut arena, a, b) = arena(
        vec![skill(1, frames(1, 1, 5).hit_stun(30)).build().unwrap()],
        CombatConfig::default(),
    );
    host.hitbox.touch(a, Contact::new(b));
    arena.combatant_mut(b).unwrap().counters_mut().gauge = 40;

    arena.execute_skill(a, &[SkillId(1)], &env).unwrap();
    arena.tick(&env);
    assert!(state_of(&arena, b).contains(EntityState::HITSTUN));

    arena.reset_round(&env);
    for id in [a, b] {
        let combatant = arena.combatant(id).unwrap();
        assert_eq!(combatant.state().get(), EntityState::IDLE);
        assert!(combatant.execution().is_none());
        assert!(!combatant.counters().is_stunned());
        assert_eq!(combatant.counters().previous_skill, None);
    }
    assert_eq!(arena.combatant(b).unwrap().counters().gauge, 40);
    assert!(arena.tick(&env).is_empty());
}
