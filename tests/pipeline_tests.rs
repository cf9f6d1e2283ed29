mod common;

use common::fixtures::{HERO_IMAGE, generated_landing_page, saved_home_page};
use common::{TestResult, assert_typed_id, node_ids, process_deterministic};
use pagesmith::{PageDocument, ZoneKey, process_document, process_page};
use serde_json::{Value, json};

#[test]
fn test_generated_page_resolves_into_zones() -> TestResult {
    let source = saved_home_page();
    let output = process_deterministic(&generated_landing_page(), Some(&source));

    let content = output["content"].as_array().unwrap();
    assert_eq!(content.len(), 2, "only parentless nodes stay top-level");

    let section_id = content[0]["props"]["id"].as_str().unwrap();
    assert_eq!(section_id, "base-00000000-0000-4000-8000-000000000001");

    let children = output["zones"][format!("{section_id}:children")]
        .as_array()
        .unwrap();
    assert_eq!(children.len(), 2);
    assert_eq!(children[0]["type"], json!("typography"));
    assert_eq!(children[1]["type"], json!("card"));

    let card_id = children[1]["props"]["id"].as_str().unwrap();
    let footer = output["zones"][format!("{card_id}:footer")].as_array().unwrap();
    assert_eq!(footer[0]["type"], json!("button"));
    Ok(())
}

#[test]
fn test_copy_reads_from_the_saved_page() -> TestResult {
    let source = saved_home_page();
    let output = process_deterministic(&generated_landing_page(), Some(&source));

    let section_id = output["content"][0]["props"]["id"].as_str().unwrap();
    let heading = &output["zones"][format!("{section_id}:children")][0];
    assert_eq!(heading["props"]["text"], json!("Welcome to Alpine Escapes"));
    Ok(())
}

#[test]
fn test_transient_fields_are_gone() -> TestResult {
    let output = process_document(&generated_landing_page().to_string(), None);
    let page = PageDocument::from_json(&output)?;

    let value = page.to_value()?;
    let text = value.to_string();
    assert!(!text.contains("parentId"));
    assert!(!text.contains("zoneName"));

    for node in page.nodes() {
        assert_typed_id(node.id().as_str(), node.type_name());
    }
    Ok(())
}

#[test]
fn test_identifiers_are_unique_and_fresh_per_run() -> TestResult {
    let raw = generated_landing_page().to_string();
    let first = process_page(&raw, None)?;
    let second = process_page(&raw, None)?;

    let mut ids = node_ids(&first);
    assert_eq!(ids.len(), 5);
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 5);

    assert_ne!(node_ids(&first), node_ids(&second));
    Ok(())
}

#[test]
fn test_property_values_are_materialized() -> TestResult {
    let page = process_page(&generated_landing_page().to_string(), None)?;
    let image = &page.content[1];

    assert_eq!(image.values()["src"], json!(HERO_IMAGE));
    assert_eq!(image.values()["alt"], json!("Mountains"));
    assert_eq!(image.properties().len(), 2);

    let section = page.to_value()?;
    assert!(section["content"][0]["props"]["properties"][0].get("value").is_none());
    Ok(())
}

#[test]
fn test_saved_page_is_a_fixed_point() -> TestResult {
    let saved = saved_home_page().to_string();
    assert_eq!(process_document(&saved, Some(&saved_home_page())), saved);

    let pretty = serde_json::to_string_pretty(&saved_home_page())?;
    assert_eq!(process_document(&pretty, None), pretty);
    Ok(())
}

#[test]
fn test_reprocessing_output_changes_nothing() -> TestResult {
    let once = process_document(&generated_landing_page().to_string(), None);
    let twice = process_document(&once, None);
    assert_eq!(once, twice);
    Ok(())
}

#[test]
fn test_existing_zones_receive_new_children() -> TestResult {
    let raw = json!({
        "content": [
            { "type": "base", "props": { "id": "base-hero", "element": "section", "children": "dropzone", "childrenProps": {} } },
            { "id": 7, "parentId": "base-hero", "type": "typography", "props": { "variant": "p", "text": "New line" } }
        ],
        "zones": {
            "base-hero:children": [
                { "type": "typography", "props": { "id": "typography-tagline", "variant": "p", "text": "Breathe higher" } }
            ]
        }
    });

    let page = process_page(&raw.to_string(), None)?;
    let zone = page.zone(&ZoneKey::parse("base-hero:children")?).unwrap();
    assert_eq!(zone.len(), 2);
    assert_eq!(zone[0].id().as_str(), "typography-tagline");
    assert_typed_id(zone[1].id().as_str(), "typography");
    Ok(())
}

#[test]
fn test_invalid_result_is_rejected() {
    // Node 2 claims a parent that never existed, so its zone has no owner.
    let raw = json!({
        "content": [
            { "id": 1, "type": "typography", "props": { "text": "Orphan's sibling" } },
            { "id": 2, "parentId": "base-ghost", "type": "typography", "props": { "text": "Orphan" } }
        ]
    });
    let err = process_page(&raw.to_string(), None).unwrap_err();
    assert!(err.to_string().contains("base-ghost"));
}

#[test]
fn test_malformed_generation_passes_through() {
    let raw = r#"{"content": [{"id": 1, "type": "base", "props": {"text": "{copy(title)}"}"#;
    let source: Value = json!({ "title": "ignored" });
    assert_eq!(process_document(raw, Some(&source)), raw.replace("{copy(title)}", "ignored"));
}
