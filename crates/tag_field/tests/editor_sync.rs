//! End-to-end editor behavior against recording collaborators.

use tag_core::Candidate;
use tag_field::{
    EditorSettings, FormHost, Key, NodeHandle, OptionsSource, RenderedTag, TagEditor,
    TagRenderer, TagUpdate,
};

#[derive(Default)]
struct RecordingRenderer {
    next_handle: u64,
    nodes: Vec<RenderedTag>,
}

impl TagRenderer for RecordingRenderer {
    fn create_node(&mut self, value: &str, label: &str) -> NodeHandle {
        self.next_handle += 1;
        let handle = NodeHandle(self.next_handle);
        self.nodes.push(RenderedTag {
            handle,
            value: Some(value.to_string()),
            text: label.to_string(),
        });
        handle
    }

    fn destroy_node(&mut self, handle: NodeHandle) {
        self.nodes.retain(|n| n.handle != handle);
    }

    fn read_nodes(&self) -> Vec<RenderedTag> {
        self.nodes.clone()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
enum Call {
    Projected(Vec<String>),
    Added { value: String, known_option: bool },
    Removed(String),
    Change,
    Invalid(String),
}

#[derive(Default)]
struct RecordingForm {
    calls: Vec<Call>,
}

impl FormHost for RecordingForm {
    fn set_projected_value(&mut self, values: &[String]) {
        self.calls.push(Call::Projected(values.to_vec()));
    }

    fn notify_update(&mut self, update: &TagUpdate) {
        self.calls.push(match update {
            TagUpdate::Added {
                value,
                known_option,
            } => Call::Added {
                value: value.clone(),
                known_option: *known_option,
            },
            TagUpdate::Removed { value } => Call::Removed(value.clone()),
        });
    }

    fn notify_change(&mut self) {
        self.calls.push(Call::Change);
    }

    fn report_invalid(&mut self, message: &str) {
        self.calls.push(Call::Invalid(message.to_string()));
    }
}

type Editor<O> = TagEditor<RecordingRenderer, RecordingForm, O>;

fn multi() -> Editor<Vec<Candidate>> {
    TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        Vec::new(),
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    )
}

fn single() -> Editor<Vec<Candidate>> {
    TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        Vec::new(),
        EditorSettings::default(),
    )
}

fn drain<O: OptionsSource>(ed: &mut Editor<O>) -> Vec<Call> {
    ed.form_mut().calls.drain(..).collect()
}

fn node(handle: u64, value: &str, text: &str) -> RenderedTag {
    RenderedTag {
        handle: NodeHandle(handle),
        value: Some(value.to_string()),
        text: text.to_string(),
    }
}

fn projected(values: &[&str]) -> Call {
    Call::Projected(values.iter().map(|v| (*v).to_string()).collect())
}

fn added(value: &str) -> Call {
    Call::Added {
        value: value.to_string(),
        known_option: false,
    }
}

#[test]
fn typing_then_enter_adds_a_tag_at_the_cursor() {
    let mut ed = multi();
    for c in "rust".chars() {
        ed.handle_key(Key::Char(c));
    }
    assert_eq!(ed.buffer(), "rust");
    assert!(ed.is_empty());

    ed.handle_key(Key::Enter);
    assert_eq!(ed.values(), ["rust"]);
    assert_eq!(ed.buffer(), "");
    assert_eq!(ed.renderer().nodes.len(), 1);
}

#[test]
fn delimiter_keystroke_submits_the_buffer() {
    let mut ed = multi();
    ed.handle_key(Key::Char('a'));
    ed.handle_key(Key::Char(','));
    assert_eq!(ed.values(), ["a"]);
    assert_eq!(ed.buffer(), "");
}

#[test]
fn item_updates_fire_before_the_single_change() {
    let mut ed = multi();
    drain(&mut ed);

    ed.add("a, b");
    assert_eq!(
        drain(&mut ed),
        vec![
            projected(&["a", "b"]),
            added("a"),
            added("b"),
            Call::Change,
        ]
    );
}

#[test]
fn set_values_with_identical_list_fires_no_change() {
    let mut ed = multi();
    ed.add("a,b");
    drain(&mut ed);

    ed.set_values(&["a", "b"]);
    assert_eq!(drain(&mut ed), vec![projected(&["a", "b"])]);
}

#[test]
fn set_values_with_new_list_fires_one_change_and_no_item_updates() {
    let mut ed = multi();
    ed.add("a,b");
    drain(&mut ed);

    ed.set_values(&["c"]);
    assert_eq!(drain(&mut ed), vec![projected(&["c"]), Call::Change]);
    assert_eq!(ed.renderer().nodes.len(), 1);
}

#[test]
fn empty_collection_projects_a_single_empty_placeholder() {
    let mut ed = multi();
    assert_eq!(drain(&mut ed), vec![projected(&[""])]);

    ed.add("a");
    drain(&mut ed);
    ed.remove("a");
    assert_eq!(
        drain(&mut ed),
        vec![projected(&[""]), Call::Removed("a".to_string()), Call::Change]
    );
}

#[test]
fn backspace_removes_a_tag_only_on_the_second_press() {
    let mut ed = multi();
    ed.add("a,b");
    drain(&mut ed);

    ed.handle_key(Key::Backspace);
    assert_eq!(ed.armed(), Some(1));
    assert_eq!(ed.values(), ["a", "b"]);
    assert!(drain(&mut ed).is_empty());

    ed.handle_key(Key::Backspace);
    assert_eq!(ed.values(), ["a"]);
    assert_eq!(
        drain(&mut ed),
        vec![projected(&["a"]), Call::Removed("b".to_string()), Call::Change]
    );
}

#[test]
fn any_other_keystroke_disarms_a_pending_delete() {
    let mut ed = multi();
    ed.add("a");
    ed.handle_key(Key::Backspace);
    assert_eq!(ed.armed(), Some(0));

    ed.handle_key(Key::Char('x'));
    assert_eq!(ed.armed(), None);
    assert_eq!(ed.values(), ["a"]);
}

#[test]
fn blur_disarms_a_pending_delete() {
    let mut ed = multi();
    ed.add("a");
    ed.handle_key(Key::Backspace);
    ed.blur();
    assert_eq!(ed.armed(), None);

    ed.handle_key(Key::Backspace);
    // The press after blur arms again instead of confirming.
    assert_eq!(ed.values(), ["a"]);
}

#[test]
fn backspace_edits_the_buffer_before_touching_tags() {
    let mut ed = multi();
    ed.add("a");
    ed.handle_key(Key::Char('x'));
    ed.handle_key(Key::Char('y'));

    ed.handle_key(Key::Backspace);
    assert_eq!(ed.buffer(), "x");
    assert_eq!(ed.values(), ["a"]);
}

#[test]
fn enter_with_empty_buffer_only_disarms() {
    let mut ed = multi();
    ed.add("a");
    ed.handle_key(Key::Backspace);
    drain(&mut ed);

    ed.handle_key(Key::Enter);
    assert_eq!(ed.armed(), None);
    assert_eq!(ed.values(), ["a"]);
    assert!(drain(&mut ed).is_empty());
}

#[test]
fn paste_appends_at_the_end_regardless_of_cursor() {
    let mut ed = multi();
    ed.add("a,b");
    ed.set_cursor(0);

    ed.paste("x, y");
    assert_eq!(ed.values(), ["a", "b", "x", "y"]);
    assert_eq!(ed.buffer(), "");
}

#[test]
fn disabled_editor_ignores_keystrokes_and_paste_but_not_the_api() {
    let mut ed = multi();
    ed.set_enabled(false);

    ed.handle_key(Key::Char('a'));
    ed.handle_key(Key::Enter);
    ed.paste("b");
    assert!(ed.is_empty());
    assert_eq!(ed.buffer(), "");

    ed.add("c");
    assert_eq!(ed.values(), ["c"]);
}

#[test]
fn single_mode_is_the_default_and_caps_at_one_tag() {
    let mut ed = single();
    ed.add("a");
    drain(&mut ed);

    ed.add("b");
    assert_eq!(ed.values(), ["a"]);
    assert!(drain(&mut ed).is_empty());
}

#[test]
fn leaving_multiple_mode_drops_the_tail_with_removals() {
    let mut ed = multi();
    ed.add("a,b,c");
    drain(&mut ed);

    ed.set_multiple(false);
    assert_eq!(ed.values(), ["a"]);
    assert_eq!(ed.renderer().nodes.len(), 1);
    assert_eq!(
        drain(&mut ed),
        vec![
            projected(&["a"]),
            Call::Removed("b".to_string()),
            Call::Removed("c".to_string()),
            Call::Change,
        ]
    );
}

#[test]
fn reset_clears_buffer_and_tags_through_normal_removal() {
    let mut ed = multi();
    ed.add("a,b");
    ed.handle_key(Key::Char('x'));
    drain(&mut ed);

    ed.reset();
    assert!(ed.is_empty());
    assert_eq!(ed.buffer(), "");
    assert_eq!(
        drain(&mut ed),
        vec![
            projected(&[""]),
            Call::Removed("a".to_string()),
            Call::Removed("b".to_string()),
            Call::Change,
        ]
    );
}

#[test]
fn nodes_present_at_construction_are_adopted_silently() {
    let mut renderer = RecordingRenderer::default();
    renderer.nodes.push(node(100, "js", "JavaScript"));
    renderer.nodes.push(node(101, "rs", "Rust"));

    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        renderer,
        RecordingForm::default(),
        Vec::new(),
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    );
    assert_eq!(ed.values(), ["js", "rs"]);
    assert_eq!(ed.labels(), ["JavaScript", "Rust"]);
    assert_eq!(ed.cursor(), 2);
    // Initialization projects the value but fires no notifications.
    assert_eq!(drain(&mut ed), vec![projected(&["js", "rs"])]);
}

#[test]
fn structural_change_rebuilds_the_store_from_the_host_nodes() {
    let mut ed = multi();
    ed.add("old");
    drain(&mut ed);

    ed.renderer_mut().nodes.push(node(200, "new", "New"));
    assert!(ed.apply_structural_change());
    assert_eq!(ed.values(), ["old", "new"]);
    assert_eq!(ed.cursor(), 2);
    assert_eq!(
        drain(&mut ed),
        vec![projected(&["old", "new"]), Call::Change]
    );
}

#[test]
fn structural_change_in_single_mode_destroys_extra_nodes() {
    let mut ed = single();
    ed.renderer_mut().nodes.push(node(200, "a", "a"));
    ed.renderer_mut().nodes.push(node(201, "b", "b"));

    ed.apply_structural_change();
    assert_eq!(ed.values(), ["a"]);
    assert_eq!(ed.renderer().nodes.len(), 1);
}

#[test]
fn suggestions_match_the_buffer_and_exclude_used_values() {
    let options = vec![
        Candidate::with_label("react", "React"),
        Candidate::with_label("redux", "Redux"),
        Candidate::new("vue"),
    ];
    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        options,
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    );

    ed.add("react");
    for c in "re".chars() {
        ed.handle_key(Key::Char(c));
    }
    let got: Vec<String> = ed.suggestions().into_iter().map(|s| s.value).collect();
    assert_eq!(got, ["redux"]);
}

#[test]
fn accepting_a_suggestion_keeps_the_label_and_clears_the_buffer() {
    let options = vec![Candidate::with_label("react", "React")];
    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        options,
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    );
    for c in "rea".chars() {
        ed.handle_key(Key::Char(c));
    }
    drain(&mut ed);

    let suggestion = ed.suggestions().into_iter().next().unwrap();
    ed.accept_suggestion(&suggestion);

    assert_eq!(ed.values(), ["react"]);
    assert_eq!(ed.labels(), ["React"]);
    assert_eq!(ed.buffer(), "");
    assert_eq!(ed.renderer().nodes[0].text, "React");
    assert_eq!(
        drain(&mut ed),
        vec![
            projected(&["react"]),
            Call::Added {
                value: "react".to_string(),
                known_option: true,
            },
            Call::Change,
        ]
    );
}

#[test]
fn free_text_matching_an_option_is_flagged_as_known() {
    let options = vec![Candidate::new("vue")];
    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        options,
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    );
    drain(&mut ed);

    ed.add("vue, other");
    assert_eq!(
        drain(&mut ed),
        vec![
            projected(&["vue", "other"]),
            Call::Added {
                value: "vue".to_string(),
                known_option: true,
            },
            Call::Added {
                value: "other".to_string(),
                known_option: false,
            },
            Call::Change,
        ]
    );
}

#[test]
fn options_edits_are_visible_on_the_next_read() {
    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        Vec::new(),
        EditorSettings {
            multiple: true,
            ..EditorSettings::default()
        },
    );
    ed.handle_key(Key::Char('v'));
    assert!(ed.suggestions().is_empty());

    ed.options_mut().push(Candidate::new("vue"));
    let got: Vec<String> = ed.suggestions().into_iter().map(|s| s.value).collect();
    assert_eq!(got, ["vue"]);
}

#[test]
fn required_and_empty_is_the_only_invalid_state() {
    let mut ed: Editor<Vec<Candidate>> = TagEditor::new(
        RecordingRenderer::default(),
        RecordingForm::default(),
        Vec::new(),
        EditorSettings {
            multiple: true,
            required: true,
            ..EditorSettings::default()
        },
    );
    assert!(!ed.check_validity());

    let validity = ed.report_validity();
    assert!(!validity.valid);
    assert!(
        ed.form()
            .calls
            .contains(&Call::Invalid("Please fill out this field.".to_string()))
    );

    ed.add("a");
    assert!(ed.check_validity());

    ed.set_required(false);
    ed.remove_all();
    assert!(ed.check_validity());
}

#[test]
fn add_at_inserts_mid_collection() {
    let mut ed = multi();
    ed.add("a,d");
    drain(&mut ed);

    ed.add_at("b,c", 1);
    assert_eq!(ed.values(), ["a", "b", "c", "d"]);
    let rendered: Vec<&str> = ed
        .renderer()
        .nodes
        .iter()
        .filter_map(|n| n.value.as_deref())
        .collect();
    // The fake appends created nodes; logical order lives in the store.
    assert_eq!(rendered.len(), 4);
}

#[test]
fn case_is_preserved_by_default_but_exact_repeats_are_rejected() {
    let mut ed = multi();
    ed.add("JS");
    ed.add("js");
    ed.add("JS");
    assert_eq!(ed.values(), ["JS", "js"]);
}
