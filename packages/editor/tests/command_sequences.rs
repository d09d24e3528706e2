//! Command scripts run against a multi-block document

use prose_common::{mark_runs, plain_text, schema_issues};
use prose_editor::{BlockType, Command, CommandOutcome, Editor, EditorConfig, MarkType, Value};

const VALUE: &str = r#"{
    "object": "value",
    "document": { "nodes": [
        { "object": "block", "type": "paragraph", "nodes": [
            { "object": "text", "text": "This is editable " },
            { "object": "text", "text": "rich", "marks": [{ "type": "bold" }] },
            { "object": "text", "text": " text, " },
            { "object": "text", "text": "much", "marks": [{ "type": "italic" }] },
            { "object": "text", "text": " better than a " },
            { "object": "text", "text": "<textarea>", "marks": [{ "type": "code" }] },
            { "object": "text", "text": "!" }
        ] },
        { "object": "block", "type": "paragraph", "nodes": [
            { "object": "text", "text": "Since it's rich text, you can do things like turn a selection of text " },
            { "object": "text", "text": "bold", "marks": [{ "type": "bold" }] },
            { "object": "text", "text": "." }
        ] },
        { "object": "block", "type": "block-quote", "nodes": [{ "object": "text", "text": "A wise quote." }] },
        { "object": "block", "type": "paragraph", "nodes": [{ "object": "text", "text": "Try it out for yourself!" }] }
    ] }
}"#;

fn editor() -> Editor {
    Editor::from_json(VALUE, EditorConfig::default()).unwrap()
}

fn run(editor: &mut Editor, script: &str) -> Vec<CommandOutcome> {
    Command::script_from_json(script)
        .unwrap()
        .into_iter()
        .map(|command| editor.submit(command))
        .collect()
}

fn list_depths(value: &Value) -> Vec<usize> {
    let doc = &value.document;
    doc.texts()
        .into_iter()
        .map(|t| {
            doc.ancestors(t)
                .into_iter()
                .filter(|a| doc.get(*a).and_then(|n| n.block_type()).map(|b| b.is_list()).unwrap_or(false))
                .count()
        })
        .collect()
}

#[test]
fn test_mark_toggle_twice_across_blocks() {
    let mut editor = editor();
    let before = mark_runs(&editor.value().document);

    let outcomes = run(
        &mut editor,
        r#"[
            {"command":"select","anchor":{"path":[2,0],"offset":2},"focus":{"path":[3,0],"offset":5}},
            {"command":"toggle_mark","mark":"code"},
            {"command":"toggle_mark","mark":"code"}
        ]"#,
    );

    assert!(outcomes.iter().all(CommandOutcome::is_changed));
    assert_eq!(mark_runs(&editor.value().document), before);
}

#[test]
fn test_mixed_selection_bold_removes_everywhere() {
    let mut editor = editor();

    run(
        &mut editor,
        r#"[
            {"command":"select","anchor":{"path":[0,0],"offset":0},"focus":{"path":[0,6],"offset":1}},
            {"command":"toggle_mark","mark":"bold"}
        ]"#,
    );

    let runs = mark_runs(&editor.value().document);
    assert!(runs.iter().take(40).all(|(_, m)| !m.contains(&MarkType::Bold)));
    assert_eq!(
        plain_text(&editor.value().document),
        plain_text(&Value::from_json(VALUE).unwrap().document)
    );
}

#[test]
fn test_list_switching_never_nests() {
    let mut editor = editor();

    let outcomes = run(
        &mut editor,
        r#"[
            {"command":"select","anchor":{"path":[0,0],"offset":3},"focus":{"path":[2,0],"offset":4}},
            {"command":"toggle_block","block":"bulleted-list"},
            {"command":"toggle_block","block":"numbered-list"},
            {"command":"toggle_block","block":"bulleted-list"}
        ]"#,
    );
    assert!(outcomes.iter().all(CommandOutcome::is_changed));

    let value = editor.value();
    assert!(schema_issues(&value.document).is_empty());
    assert_eq!(&list_depths(value)[..11], &[1; 11]);
    assert_eq!(list_depths(value)[11], 0);

    let kinds: Vec<BlockType> = value
        .document
        .roots()
        .iter()
        .filter_map(|k| value.document.get(*k).and_then(|n| n.block_type()))
        .collect();
    assert_eq!(kinds, vec![BlockType::BulletedList, BlockType::Paragraph]);
}

#[test]
fn test_link_then_unlink_script() {
    let mut editor = editor();
    let before = plain_text(&editor.value().document);

    run(
        &mut editor,
        r#"[
            {"command":"select","anchor":{"path":[3,0],"offset":0},"focus":{"path":[3,0],"offset":3}},
            {"command":"wrap_link","href":"https://try.example"},
            {"command":"select","anchor":{"path":[3,0,0],"offset":1},"focus":{"path":[3,0,0],"offset":1}}
        ]"#,
    );
    assert!(editor.toolbar().is_active("link"));

    let outcomes = run(&mut editor, r#"[{"command":"unwrap_link"}]"#);
    assert!(outcomes[0].is_changed());
    assert!(!editor.toolbar().is_active("link"));
    assert_eq!(plain_text(&editor.value().document), before);
}

#[test]
fn test_invalid_commands_are_rejected() {
    let mut editor = editor();
    let before = editor.value().clone();

    let outcomes = run(
        &mut editor,
        r#"[
            {"command":"select","anchor":{"path":[9,0],"offset":0},"focus":{"path":[0,0],"offset":0}},
            {"command":"select","anchor":{"path":[0,0],"offset":0},"focus":{"path":[0,0],"offset":4}},
            {"command":"insert_text","text":"nope"}
        ]"#,
    );

    assert!(matches!(outcomes[0], CommandOutcome::Rejected(_)));
    assert!(outcomes[1].is_changed());
    assert!(matches!(outcomes[2], CommandOutcome::Rejected(_)));
    assert_eq!(editor.value().document, before.document);
}
