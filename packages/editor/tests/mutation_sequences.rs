//! Tests for longer mutation sequences
//!
//! This tests:
//! - Undo/redo round-trips over mixed edits
//! - Discarded redo branches
//! - Order and id invariants after many operations

use std::collections::HashSet;
use storefront_editor::{BlockSettingsPatch, DesignStore, Mutation, SectionType};

fn ids(store: &DesignStore) -> Vec<String> {
    store.sections().iter().map(|s| s.id.clone()).collect()
}

fn assert_unique_ids(store: &DesignStore) {
    let mut seen = HashSet::new();
    for section in store.sections() {
        assert!(seen.insert(section.id.clone()), "duplicate section id {}", section.id);
        let mut blocks = HashSet::new();
        for block in &section.blocks {
            assert!(blocks.insert(block.id.clone()), "duplicate block id {}", block.id);
        }
    }
}

#[test]
fn test_undo_redo_round_trip() {
    let mut store = DesignStore::new();
    store.load_empty("shop-1");
    let hero = store.add_section("hero", None).unwrap();
    let before = store.design().clone();

    let block = store.add_block(&hero, "heading", None).unwrap();
    store.add_section("gallery", Some(0)).unwrap();
    store.duplicate_section(&hero).unwrap();
    store.reorder_sections(2, 0).unwrap();
    store
        .update_block_settings(
            &hero,
            &block,
            BlockSettingsPatch {
                margin_bottom: Some(4),
                ..Default::default()
            },
        )
        .unwrap();
    let settings = serde_json::json!({ "primaryColor": "#ff0000" });
    store
        .update_global_settings(settings.as_object().cloned().unwrap())
        .unwrap();
    let after = store.design().clone();

    const N: usize = 6;
    for _ in 0..N {
        assert!(store.undo());
    }
    assert_eq!(store.design(), &before);

    for _ in 0..N {
        assert!(store.redo());
    }
    assert_eq!(store.design(), &after);
    assert!(!store.redo());
}

#[test]
fn test_undo_then_edit_discards_redo() {
    let mut store = DesignStore::new();
    store.add_section("hero", None).unwrap();
    store.add_section("contact", None).unwrap();

    assert!(store.undo());
    store.add_section("newsletter", None).unwrap();

    assert!(!store.can_redo());
    assert!(!store.redo());
    let types: Vec<_> = store.sections().iter().map(|s| s.section_type()).collect();
    assert_eq!(types, vec![SectionType::Hero, SectionType::Newsletter]);
}

#[test]
fn test_reorder_preserves_relative_order() {
    let mut store = DesignStore::new();
    for section_type in ["hero", "features", "gallery", "testimonials", "contact", "newsletter"] {
        store.add_section(section_type, None).unwrap();
    }
    let original = ids(&store);
    let len = original.len();

    for from in 0..len {
        for to in 0..len {
            store.reorder_sections(from, to).unwrap();
            let reordered = ids(&store);

            assert_eq!(reordered[to], original[from]);
            let rest_before: Vec<_> = original.iter().filter(|id| **id != original[from]).collect();
            let rest_after: Vec<_> = reordered.iter().filter(|id| **id != original[from]).collect();
            assert_eq!(rest_before, rest_after);

            assert!(store.undo());
            assert_eq!(ids(&store), original);
        }
    }
}

#[test]
fn test_out_of_range_reorder_is_rejected() {
    let mut store = DesignStore::new();
    store.add_section("hero", None).unwrap();
    store.add_section("contact", None).unwrap();
    let before = store.design().clone();
    let levels = store.history().len();

    assert!(store.reorder_sections(0, 2).is_err());
    assert!(store.reorder_sections(5, 0).is_err());
    assert_eq!(store.design(), &before);
    assert_eq!(store.history().len(), levels);
}

#[test]
fn test_ids_stay_unique() {
    let mut store = DesignStore::new();
    let hero = store.add_section("hero", None).unwrap();
    let block = store.add_block(&hero, "button", None).unwrap();
    store.duplicate_block(&hero, &block).unwrap();
    store.duplicate_block(&hero, &block).unwrap();

    let mut last = hero;
    for _ in 0..10 {
        last = store.duplicate_section(&last).unwrap();
        store.add_section("rich_text", Some(0)).unwrap();
    }

    assert_eq!(store.sections().len(), 21);
    assert_unique_ids(&store);
}

#[test]
fn test_stale_references_are_not_found() {
    let mut store = DesignStore::new();
    let hero = store.add_section("hero", None).unwrap();
    let block = store.add_block(&hero, "text", None).unwrap();
    store.remove_section(&hero).unwrap();

    let stale = [
        store.apply(Mutation::DuplicateSection {
            section_id: hero.clone(),
        }),
        store.apply(Mutation::DeleteBlock {
            section_id: hero.clone(),
            block_id: block.clone(),
        }),
        store.apply(Mutation::ReorderBlocks {
            section_id: hero.clone(),
            from: 0,
            to: 0,
        }),
    ];
    for result in stale {
        assert!(result.unwrap_err().is_not_found());
    }
}

#[test]
fn test_block_reorder_keeps_sibling_sections() {
    let mut store = DesignStore::new();
    let a = store.add_section("hero", None).unwrap();
    let b = store.add_section("rich_text", None).unwrap();
    store.add_block(&b, "heading", None).unwrap();
    store.add_block(&b, "text", None).unwrap();

    for block_type in ["heading", "text", "button"] {
        store.add_block(&a, block_type, None).unwrap();
    }
    let sibling = store.section(&b).unwrap().clone();

    store.reorder_blocks(&a, 2, 0).unwrap();

    let order: Vec<_> = store
        .section(&a)
        .unwrap()
        .blocks
        .iter()
        .map(|b| b.block_type().as_str())
        .collect();
    assert_eq!(order, vec!["button", "heading", "text"]);
    assert_eq!(store.section(&b).unwrap(), &sibling);
}
