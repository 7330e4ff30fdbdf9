use scraper::{Html, Selector};
use serde_json::Value;

/// Collects every JSON-LD object in the document.
/// Top-level arrays and `@graph` containers are flattened.
pub fn extract_objects(document: &Html) -> Vec<Value> {
    let mut objects = Vec::new();

    if let Ok(script_selector) = Selector::parse("script[type='application/ld+json']") {
        for script in document.select(&script_selector) {
            let raw = script.text().collect::<String>();
            if let Ok(json) = serde_json::from_str::<Value>(raw.trim()) {
                flatten(json, &mut objects);
            }
        }
    }

    objects
}

fn flatten(value: Value, out: &mut Vec<Value>) {
    match value {
        Value::Array(items) => {
            for item in items {
                flatten(item, out);
            }
        }
        Value::Object(mut map) => {
            if let Some(graph) = map.remove("@graph") {
                flatten(graph, out);
            }
            out.push(Value::Object(map));
        }
        _ => {}
    }
}

/// Extracts authors from JSON-LD metadata in the HTML document.
/// Returns a vector of author names.
pub fn extract_authors(objects: &[Value]) -> Vec<String> {
    let mut authors = Vec::new();

    for json in objects {
        // Try to get author from the JSON-LD data
        if let Some(author) = json.get("author") {
            match author {
                Value::Array(arr) => {
                    for author_obj in arr {
                        if let Some(name) = author_obj.get("name").and_then(|n| n.as_str()) {
                            authors.push(name.trim().to_string());
                        } else if let Some(name) = author_obj.as_str() {
                            authors.push(name.trim().to_string());
                        }
                    }
                }
                Value::Object(obj) => {
                    if let Some(name) = obj.get("name").and_then(|n| n.as_str()) {
                        authors.push(name.trim().to_string());
                    }
                }
                Value::String(s) => {
                    authors.push(s.trim().to_string());
                }
                _ => {}
            }
        }
    }

    authors.retain(|a| !a.is_empty());
    authors.dedup();
    authors
}

pub fn extract_headline(objects: &[Value]) -> Option<String> {
    first_string(objects, "headline")
}

pub fn extract_date_published(objects: &[Value]) -> Option<String> {
    first_string(objects, "datePublished")
}

/// `image` may be a URL string, an ImageObject, or an array of either.
pub fn extract_image(objects: &[Value]) -> Option<String> {
    objects
        .iter()
        .filter_map(|json| json.get("image"))
        .find_map(image_url)
}

fn image_url(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.trim().to_string()),
        Value::Object(obj) => obj.get("url").and_then(image_url),
        Value::Array(arr) => arr.iter().find_map(image_url),
        _ => None,
    }
}

fn first_string(objects: &[Value], key: &str) -> Option<String> {
    objects
        .iter()
        .filter_map(|json| json.get(key).and_then(|v| v.as_str()))
        .map(str::trim)
        .find(|v| !v.is_empty())
        .map(str::to_string)
}
