//! Loads the data directory shipped with the crate and plays every dungeon.

use std::path::PathBuf;

use battle_content::ContentFactory;
use battle_core::{BattleSimulator, EffectFamily, SkillBehavior};

fn factory() -> ContentFactory {
    ContentFactory::new(PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("data"))
}

#[test]
fn shipped_dungeons_are_listed() {
    let names = factory().list_dungeons().unwrap();
    assert!(names.contains(&"forgotten_crypt".to_string()));
    assert!(names.contains(&"ember_halls".to_string()));
}

#[test]
fn legacy_names_resolve_to_behaviors() {
    let crypt = factory().load_dungeon("forgotten_crypt").unwrap();
    let acolyte = crypt.allies.iter().find(|u| u.name == "Acolyte").unwrap();

    let advanced = acolyte.skills.advanced.as_ref().unwrap();
    let ultimate = acolyte.skills.ultimate.as_ref().unwrap();
    assert_eq!(advanced.behavior, SkillBehavior::Heal);
    assert_eq!(ultimate.behavior, SkillBehavior::Cleanse);

    let pyromancer = crypt.allies.iter().find(|u| u.name == "Pyromancer").unwrap();
    let fireball = pyromancer.skills.advanced.as_ref().unwrap();
    assert_eq!(fireball.family, EffectFamily::Fire);
    assert_eq!(fireball.status_duration, Some(3));

    // explicit behavior suppresses the "chill" keyword
    let wraith = crypt.enemies.iter().find(|u| u.name == "Wraith").unwrap();
    let touch = wraith.skills.basic.as_ref().unwrap();
    assert_eq!(touch.behavior, SkillBehavior::Standard);
}

#[test]
fn every_shipped_dungeon_plays_to_an_outcome() {
    let factory = factory();
    let base = factory.load_config().unwrap();

    for name in factory.list_dungeons().unwrap() {
        let dungeon = factory.load_dungeon(&name).unwrap();
        let mut config = base.clone();
        dungeon.apply_to(&mut config);

        let mut sim = BattleSimulator::new(config, &dungeon.allies, &dungeon.enemies, 42).unwrap();
        let report = sim.run_to_completion().unwrap();

        assert!(report.stages_cleared <= report.total_stages, "{name}");
        assert!(sim.is_finished(), "{name}");
    }
}
