#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use fight_core::{
    AnimationHandle, AnimationOracle, AnimationRef, Arena, Character, CombatConfig, CombatEnv,
    CombatantId, Contact, EntityState, Env, FrameData, FrameDataBuilder, Hitbox, HitboxOracle,
    HitboxRegion, MovementOracle, Skill, SkillBuilder, SkillCatalog, SkillId,
};

/// Returns the scripted contacts of an attacker on every active tick.
#[derive(Default)]
pub struct ScriptedHitbox {
    contacts: Mutex<HashMap<CombatantId, Vec<Contact>>>,
}

impl ScriptedHitbox {
    pub fn touch(&self, attacker: CombatantId, contact: Contact) {
        self.contacts
            .lock()
            .unwrap()
            .entry(attacker)
            .or_default()
            .push(contact);
    }

    pub fn clear(&self) {
        self.contacts.lock().unwrap().clear();
    }
}

impl HitboxOracle for ScriptedHitbox {
    fn query(&self, attacker: CombatantId, _skill: &Skill, _elapsed: u32) -> Vec<Contact> {
        self.contacts
            .lock()
            .unwrap()
            .get(&attacker)
            .cloned()
            .unwrap_or_default()
    }
}

/// Hands out sequential handles and remembers what was started and stopped.
#[derive(Default)]
pub struct RecordingAnimation {
    next: AtomicU64,
    loaded: Mutex<Vec<(CombatantId, String, AnimationHandle)>>,
    playing: Mutex<HashSet<AnimationHandle>>,
    stopped: Mutex<Vec<AnimationHandle>>,
}

impl RecordingAnimation {
    pub fn handle_of(&self, key: &str) -> Option<AnimationHandle> {
        self.loaded
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(_, k, _)| k == key)
            .map(|(_, _, h)| *h)
    }

    pub fn stopped(&self) -> Vec<AnimationHandle> {
        self.stopped.lock().unwrap().clone()
    }
}

impl AnimationOracle for RecordingAnimation {
    fn load(&self, owner: CombatantId, animation: &AnimationRef) -> Option<AnimationHandle> {
        let handle = AnimationHandle(self.next.fetch_add(1, Ordering::SeqCst));
        self.loaded
            .lock()
            .unwrap()
            .push((owner, animation.0.clone(), handle));
        Some(handle)
    }

    fn play(&self, handle: AnimationHandle) {
        self.playing.lock().unwrap().insert(handle);
    }

    fn stop(&self, handle: AnimationHandle) {
        self.playing.lock().unwrap().remove(&handle);
        self.stopped.lock().unwrap().push(handle);
    }

    fn is_playing(&self, handle: AnimationHandle) -> bool {
        self.playing.lock().unwrap().contains(&handle)
    }
}

pub struct FixedGround {
    grounded: AtomicBool,
}

impl FixedGround {
    pub fn new(grounded: bool) -> Self {
        Self {
            grounded: AtomicBool::new(grounded),
        }
    }

    pub fn set(&self, grounded: bool) {
        self.grounded.store(grounded, Ordering::SeqCst);
    }
}

impl MovementOracle for FixedGround {
    fn is_grounded(&self, _combatant: CombatantId) -> bool {
        self.grounded.load(Ordering::SeqCst)
    }
}

/// Oracles bundled for one test.
pub struct Host {
    pub animation: RecordingAnimation,
    pub hitbox: ScriptedHitbox,
    pub movement: FixedGround,
}

impl Host {
    pub fn new() -> Self {
        init_tracing();
        Self {
            animation: RecordingAnimation::default(),
            hitbox: ScriptedHitbox::default(),
            movement: FixedGround::new(true),
        }
    }

    pub fn env(&self) -> CombatEnv<'_> {
        Env::with_all(&self.animation, &self.hitbox, &self.movement).as_combat_env()
    }
}

/// Routes engine logs through the test harness; `RUST_LOG=fight_core=debug`
/// shows every phase transition.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub fn frames(startup: u32, active: u32, recovery: u32) -> FrameDataBuilder {
    FrameData::builder()
        .startup(startup)
        .active(active)
        .recovery(recovery)
        .hitbox(Hitbox::new(HitboxRegion::High, "RightArm"))
}

pub fn skill(id: u32, frame_data: FrameDataBuilder) -> SkillBuilder {
    Skill::builder(SkillId(id), format!("skill-{id}")).frame_data(frame_data.build().unwrap())
}

/// Arena with two combatants sharing one character.
pub fn arena(skills: Vec<Skill>, config: CombatConfig) -> (Arena, CombatantId, CombatantId) {
    arena_with(Character::new("Tester"), skills, config)
}

pub fn arena_with(
    character: Character,
    skills: Vec<Skill>,
    config: CombatConfig,
) -> (Arena, CombatantId, CombatantId) {
    init_tracing();
    let mut catalog = SkillCatalog::new();
    for skill in skills {
        catalog.register(skill).unwrap();
    }
    catalog.validate().unwrap();

    let character = Arc::new(character);
    let mut arena = Arena::new(Arc::new(catalog), config);
    let attacker = arena.spawn(Arc::clone(&character)).unwrap();
    let defender = arena.spawn(character).unwrap();
    (arena, attacker, defender)
}

pub fn state_of(arena: &Arena, id: CombatantId) -> EntityState {
    arena.combatant(id).unwrap().state().get()
}

/// One letter per skill phase: S(tartup), A(ttack), R(ecovery), or I(dle)
/// when no phase bit is set.
pub fn phase_letter(state: EntityState) -> char {
    let phases = state & EntityState::SKILL_PHASES;
    assert!(
        phases.bits().count_ones() <= 1,
        "more than one phase bit set: {state:?}"
    );
    if phases.contains(EntityState::STARTUP) {
        'S'
    } else if phases.contains(EntityState::ATTACK) {
        'A'
    } else if phases.contains(EntityState::RECOVERY) {
        'R'
    } else {
        'I'
    }
}
