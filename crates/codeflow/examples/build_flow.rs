//! Build a small flow from canned completions and print the export
//!
//! Run with `cargo run -p codeflow --example build_flow`.

use codeflow::prelude::*;

fn main() -> Result<(), FlowError> {
    let completions = [
        ("Install", "Run this first:\n```bash\npip install requests\n```"),
        (
            "Fetch",
            "```python\nimport requests\nr = requests.get(URL)\n```",
        ),
        ("Print", "```python\nprint(r.json())\n```"),
    ];

    let mut state = SessionState::new();
    for (name, completion) in completions {
        state = state.apply(Action::ItemCreated {
            name: Some(name.to_string()),
            completion: completion.to_string(),
        })?;
    }
    for item_id in ["item-1", "item-2", "item-3"] {
        state = state.apply(Action::PlaceItem {
            item_id: item_id.to_string(),
        })?;
    }
    state = state
        .apply(Action::Connect {
            source: "item-1".into(),
            target: "item-2".into(),
        })?
        .apply(Action::Connect {
            source: "item-2".into(),
            target: "item-3".into(),
        })?;

    let export = state.export();
    println!("=== {} ===", export.file_name);
    println!("{}", export.content);
    Ok(())
}
