//! Integration tests for the public API

use codeflow::prelude::*;
use codeflow::{extract_code_blocks, generate_preview};

fn node(id: &str) -> NodeData {
    NodeData::new(id, id.to_uppercase(), format!("// {}", id))
}

#[test]
fn test_extract_without_fences() {
    assert_eq!(extract_code_blocks("no fences here"), vec!["no fences here"]);
}

#[test]
fn test_extract_preserves_order() {
    assert_eq!(
        extract_code_blocks("text ```a``` more ```b```"),
        vec!["a", "b"]
    );
}

#[test]
fn test_extract_three_blocks() {
    let blocks = extract_code_blocks("```first``` and then ```second``` and ```third```");
    assert_eq!(blocks.len(), 3);
    assert_eq!(blocks, vec!["first", "second", "third"]);
}

#[test]
fn test_extract_typical_completion() {
    let completion = r#"Sure! First install the dependency:

```bash
pip install requests
```

Then fetch the page:

```python
import requests
print(requests.get("https://example.com").status_code)
```

Let me know if you need more."#;

    let blocks = extract_code_blocks(completion);
    assert_eq!(blocks.len(), 2);
    assert_eq!(blocks[0], "bash\npip install requests");
    assert!(blocks[1].starts_with("python\nimport requests"));
}

#[test]
fn test_preview_empty() {
    assert_eq!(generate_preview(&[], &[]), "");
}

#[test]
fn test_preview_degree_order_with_ties() {
    // A(deg=1), B(deg=2), C(deg=2) in collection order [A, B, C]
    let nodes = vec![node("a"), node("b"), node("c"), node("d")];
    let edges = vec![
        EdgeData::new("a", "b"),
        EdgeData::new("b", "c"),
        EdgeData::new("c", "d"),
    ];
    // d also has degree 1 and comes after a
    let ordered: Vec<&str> = linearize(&nodes, &edges)
        .into_iter()
        .map(|n| n.id.as_str())
        .collect();
    assert_eq!(ordered, vec!["b", "c", "a", "d"]);
}

#[test]
fn test_preview_hub_comes_first() {
    let nodes = vec![node("leaf1"), node("leaf2"), node("hub"), node("alone")];
    let edges = vec![EdgeData::new("hub", "leaf1"), EdgeData::new("leaf2", "hub")];
    assert_eq!(
        generate_preview(&nodes, &edges),
        "// hub\n\n---\n\n// leaf1\n\n---\n\n// leaf2"
    );
}

#[test]
fn test_preview_is_idempotent() {
    let nodes = vec![node("a"), node("b"), node("c")];
    let edges = vec![EdgeData::new("c", "a"), EdgeData::new("b", "c")];
    let first = generate_preview(&nodes, &edges);
    let second = generate_preview(&nodes, &edges);
    assert_eq!(first, second);
}

#[test]
fn test_preview_does_not_mutate_inputs() {
    let nodes = vec![node("a"), node("b")];
    let edges = vec![EdgeData::new("b", "a")];
    let nodes_before = nodes.clone();
    let edges_before = edges.clone();
    let _ = generate_preview(&nodes, &edges);
    assert_eq!(nodes, nodes_before);
    assert_eq!(edges, edges_before);
}

#[test]
fn test_database_and_document_agree() {
    let mut db = DiagramDatabase::new();
    for id in ["a", "b", "c"] {
        db.add_node(node(id)).unwrap();
    }
    db.connect("a", "c").unwrap();
    db.connect("c", "b").unwrap();

    let document = DiagramDocument::from_database(&db);
    assert_eq!(document.preview(), db.preview());
    assert_eq!(db.preview(), "// c\n\n---\n\n// a\n\n---\n\n// b");
}

#[test]
fn test_export_formats_listing() {
    let names: Vec<&str> = ExportFormat::all().iter().map(|f| f.extension()).collect();
    assert_eq!(
        names,
        vec![".java", ".py", ".js", ".jsx", ".ts", ".tsx", ".cpp", ".c"]
    );
}
