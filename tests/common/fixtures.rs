use serde_json::{Value, json};

pub const HERO_IMAGE: &str =
    "https://api.unsplash.com/photos/random?query=mountain&orientation=landscape&client_id=UNSPLASH_KEY";

/// A generated landing page as a generation source emits it: numeric ids,
/// `parentId` nesting, inline property values and a placeholder image.
pub fn generated_landing_page() -> Value {
    json!({
        "root": { "props": { "title": "Generated title" } },
        "content": [
            {
                "id": 1,
                "type": "base",
                "props": {
                    "element": "section",
                    "children": "dropzone",
                    "childrenProps": { "allow": ["typography", "card", "button"] },
                    "properties": [
                        { "key": "className", "valueType": "string", "value": "flex flex-col gap-4" }
                    ]
                }
            },
            {
                "id": 2,
                "parentId": 1,
                "type": "typography",
                "props": { "variant": "h1", "text": "Welcome to {copy(root.props.title)}" }
            },
            {
                "id": 3,
                "parentId": 1,
                "type": "card",
                "props": { "title": "Explore", "description": "Find your next trip" }
            },
            {
                "id": 4,
                "parentId": 3,
                "zoneName": "footer",
                "type": "button",
                "props": { "variant": "outline", "children": "Book now" }
            },
            {
                "id": 5,
                "type": "base",
                "props": {
                    "element": "img",
                    "children": "none",
                    "properties": [
                        { "key": "src", "valueType": "string", "value": HERO_IMAGE },
                        { "key": "alt", "valueType": "string", "value": "Mountains" }
                    ]
                }
            }
        ]
    })
}

/// A saved page in final form, used as the reference source.
pub fn saved_home_page() -> Value {
    json!({
        "root": { "props": { "title": "Alpine Escapes", "description": "Trips to the mountains" } },
        "content": [
            {
                "type": "base",
                "props": {
                    "id": "base-hero",
                    "element": "section",
                    "children": "dropzone",
                    "childrenProps": {}
                }
            }
        ],
        "zones": {
            "base-hero:children": [
                {
                    "type": "typography",
                    "props": { "id": "typography-tagline", "variant": "p", "text": "Breathe higher" }
                }
            ]
        }
    })
}
