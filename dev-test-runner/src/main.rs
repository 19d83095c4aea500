//! Renders realistic sample payloads through every emitter, for eyeballing
//! output while working on the generator.
use json_decl::{EmitOptions, Language, ObjectStyle, SerializerAttributes};
use serde_json::{json, Value};

/// Realistic API payload samples:
/// - nested objects with colliding key names one level down
/// - arrays of records with null padding
/// - every scalar flavour the classifier distinguishes
fn realistic_samples() -> Vec<(&'static str, Value)> {
    vec![
        (
            "Order",
            json!({
                "orderId": "67e55044-10b1-426f-9247-bb680e5fe0c8",
                "placedAt": "2024-03-01T12:30:00Z",
                "deliveryWindow": "02:00:00",
                "total": 129.95,
                "customer": {
                    "id": 42,
                    "name": "Acme Widgets",
                    "address": {"street": "1 Main St", "city": "Springfield"}
                },
                "warehouse": {
                    "address": {"dock": 7, "bay": null}
                },
                "lines": [
                    {"sku": "A-1", "qty": 2, "tags": ["hardware"]},
                    {"sku": "B-2", "qty": 1, "tags": []},
                    null
                ],
                "notes": null
            }),
        ),
        (
            "Reading",
            json!([
                {"sensor": "t1", "value": 21.5, "at": "2024-03-01 08:00:00", "flags": [1, 2, null]},
                {"sensor": "t2", "value": 19, "at": "2024-03-01 08:05:00", "flags": []},
                {"sensor": "t3", "value": null, "at": "2024-03-01 08:10:00", "flags": [4]}
            ]),
        ),
        (
            "Mixed",
            json!({
                "class": "keyword",
                "ns:key": true,
                "big": 18446744073709551615u64,
                "anything": [1, "a", 2.1],
                "matrix": [[1, 2], [3, null]],
                "empty": {}
            }),
        ),
    ]
}

fn targets() -> Vec<(&'static str, EmitOptions)> {
    let mut newtonsoft_class = EmitOptions::default().with_style(ObjectStyle::Class);
    newtonsoft_class.serializer = SerializerAttributes::Newtonsoft;
    vec![
        ("csharp record", EmitOptions::default()),
        ("csharp class (newtonsoft)", newtonsoft_class),
        ("csharp struct", EmitOptions::default().with_style(ObjectStyle::Struct)),
        ("python dataclass", EmitOptions::for_language(Language::Python)),
        (
            "python plain class",
            EmitOptions::for_language(Language::Python).with_style(ObjectStyle::PlainClass),
        ),
    ]
}

fn main() -> anyhow::Result<()> {
    for (name, sample) in realistic_samples() {
        for (label, options) in targets() {
            println!("—— {name} → {label} ——");
            match json_decl::render_document(name, &sample, &options) {
                Ok(text) => println!("{text}"),
                Err(error) => println!("failed: {error}\n"),
            }
        }
    }
    // a parse straight from text, with comments and trailing commas
    let source = r#"{
        // relaxed syntax
        "id": 1,
        "name": "a",
    }"#;
    println!("—— relaxed source → csharp record ——");
    println!("{}", json_decl::parse_with_defaults("Root", source)?);
    Ok(())
}
