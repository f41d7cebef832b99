//! Plain-text rendering of page state.
//!
//! Each page turns its [`ListView`] and its form into lines of text. The branching on the
//! resource state happens once, in [`resource_sync::dispatch`]; everything here is a
//! `match` over its result.

use resource_sync::{Form, ListView};

/// The three fixed messages of a list page.
#[derive(Debug, Clone, Copy)]
pub struct ListText {
    pub loading: &'static str,
    pub failed: &'static str,
    pub empty: &'static str,
}

/// Render a list view, one or more lines per row.
pub fn render_list<T>(
    view: &ListView<Vec<T>>,
    text: &ListText,
    row: impl Fn(&T) -> Vec<String>,
) -> Vec<String> {
    match view {
        ListView::Idle => Vec::new(),
        ListView::Loading => vec![text.loading.to_string()],
        ListView::Failed(_) => vec![text.failed.to_string()],
        ListView::Empty => vec![text.empty.to_string()],
        ListView::Ready(items) => items.iter().flat_map(row).collect(),
    }
}

/// Render an open form: its title, one line per field and the errors the user should see.
pub fn render_form(title: &str, form: &Form) -> Vec<String> {
    let mut lines = vec![title.to_string()];
    for name in form.schema().field_names() {
        lines.push(format!("  {name}: {}", form.value(name)));
        if let Some(message) = form.visible_error(name) {
            lines.push(format!("    ! {message}"));
        }
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use resource_sync::{FormSchema, LoadError, TransportError};

    const TEXT: ListText = ListText {
        loading: "Loading...",
        failed: "Failed.",
        empty: "Nothing.",
    };

    fn row(n: &u32) -> Vec<String> {
        vec![format!("#{n}")]
    }

    #[test]
    fn each_view_has_its_own_text() {
        assert!(render_list(&ListView::<Vec<u32>>::Idle, &TEXT, row).is_empty());
        assert_eq!(render_list(&ListView::Loading, &TEXT, row), ["Loading..."]);
        assert_eq!(
            render_list(
                &ListView::Failed(LoadError::Transport(TransportError::Closed)),
                &TEXT,
                row
            ),
            ["Failed."]
        );
        assert_eq!(render_list(&ListView::Empty, &TEXT, row), ["Nothing."]);
        assert_eq!(
            render_list(&ListView::Ready(vec![1, 2]), &TEXT, row),
            ["#1", "#2"]
        );
    }

    #[test]
    fn form_shows_errors_only_once_touched() {
        let form = Form::new(
            FormSchema::new()
                .field("name", "")
                .required("name", "Name is required."),
        );
        assert_eq!(render_form("New", &form), ["New", "  name: "]);

        form.blur("name");
        assert_eq!(
            render_form("New", &form),
            ["New", "  name: ", "    ! Name is required."]
        );
    }
}
