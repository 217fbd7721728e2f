use aggeditor::{Catalog, EditorState};
use anyhow::Result;

/// Initial query for `catalog`, as pretty JSON
pub fn initial_query(catalog: &Catalog) -> Result<String> {
    let state = EditorState::initial(catalog);
    Ok(serde_json::to_string_pretty(&state)?)
}

/// Print the initial query as JSON
pub fn run_init(catalog: &Catalog) -> Result<()> {
    println!("{}", initial_query(catalog)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_initial_query_parses_back() {
        let catalog = Catalog::builtin();
        let text = initial_query(&catalog).unwrap();
        let state: EditorState = serde_json::from_str(&text).unwrap();
        assert_eq!(state, EditorState::initial(&catalog));
    }
}
