use aggeditor::{Catalog, EditorAction, EditorState, QueryEditor};
use anyhow::{Context, Result};
use serde_json::json;
use std::fs;
use std::path::Path;
use std::sync::Arc;

/// Read an action script. The format follows the extension: `.yaml`/`.yml`
/// is a YAML list, `.jsonl` is one action per line, anything else a JSON array.
pub fn load_actions(path: &Path) -> Result<Vec<EditorAction>> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;

    let actions: Vec<EditorAction> = match path.extension().and_then(|e| e.to_str()) {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid YAML action script {:?}", path))?,
        Some("jsonl") => content
            .lines()
            .enumerate()
            .filter(|(_, line)| !line.trim().is_empty())
            .map(|(n, line)| {
                serde_json::from_str(line)
                    .with_context(|| format!("Invalid action on line {} of {:?}", n + 1, path))
            })
            .collect::<Result<Vec<EditorAction>>>()?,
        _ => serde_json::from_str(&content)
            .with_context(|| format!("Invalid JSON action script {:?}", path))?,
    };

    Ok(actions)
}

/// Read a starting query and restore its list invariants
pub fn load_state(path: &Path, catalog: &Catalog) -> Result<EditorState> {
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    let state: EditorState = serde_json::from_str(&content)
        .with_context(|| format!("Invalid query JSON {:?}", path))?;
    Ok(state.repaired(catalog))
}

/// Replay `actions` and return every intermediate state, starting state first
pub fn replay(editor: &mut QueryEditor, actions: &[EditorAction]) -> Vec<EditorState> {
    let mut states = Vec::with_capacity(actions.len() + 1);
    states.push(editor.state().clone());
    for action in actions {
        states.push(editor.dispatch(action).clone());
    }
    states
}

/// Run the replay command
pub fn run_replay(
    catalog: Arc<Catalog>,
    actions_path: &Path,
    query_path: Option<&Path>,
    steps: bool,
) -> Result<()> {
    let actions = load_actions(actions_path)?;
    let state = match query_path {
        Some(path) => load_state(path, &catalog)?,
        None => EditorState::initial(&catalog),
    };

    tracing::info!("Loaded {} actions", actions.len());

    let mut editor = QueryEditor::with_state(catalog, state);
    let states = replay(&mut editor, &actions);

    if steps {
        for (step, (action, state)) in actions.iter().zip(states.iter().skip(1)).enumerate() {
            let line = json!({
                "step": step + 1,
                "action": action.name(),
                "state": state,
            });
            println!("{}", serde_json::to_string(&line)?);
        }
    } else {
        println!("{}", serde_json::to_string_pretty(editor.state())?);
    }

    Ok(())
}
