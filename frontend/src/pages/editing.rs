use inventory_client::{AuxService, CrudService};
use shared::Identified;
use yew::prelude::*;

use crate::hooks::ListPageHandle;

/// Whether a list page shows its editor, and for which row
#[derive(Debug, Clone, PartialEq)]
pub enum FormMode<R> {
    Closed,
    Creating,
    Editing(R),
}

impl<R: Identified> FormMode<R> {
    pub fn is_open(&self) -> bool {
        !matches!(self, FormMode::Closed)
    }

    /// Remounts the editor whenever it switches rows
    pub fn key(&self) -> String {
        match self {
            FormMode::Editing(row) => format!("edit-{}", row.id()),
            _ => "new".to_string(),
        }
    }

    pub fn editing_id(&self) -> Option<i64> {
        match self {
            FormMode::Editing(row) => Some(row.id()),
            _ => None,
        }
    }
}

/// Submits a validated draft as a create or an update, depending on the
/// mode, and closes the editor once the save goes through
pub fn save_callback<S, X>(
    page: &ListPageHandle<S, X>,
    mode: &UseStateHandle<FormMode<S::Row>>,
    saving: &UseStateHandle<bool>,
) -> Callback<S::Draft>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    S::Row: PartialEq + 'static,
    S::Draft: 'static,
    X::Aux: Clone + PartialEq + 'static,
{
    let page = page.clone();
    let mode = mode.clone();
    let saving = saving.clone();
    Callback::from(move |draft: S::Draft| {
        let done = {
            let mode = mode.clone();
            let saving = saving.clone();
            Callback::from(move |saved: bool| {
                saving.set(false);
                if saved {
                    mode.set(FormMode::Closed);
                }
            })
        };
        saving.set(true);
        match mode.editing_id() {
            Some(id) => page.update(id, draft, done),
            None => page.create(draft, done),
        }
    })
}

/// Asks before deleting; nothing is sent if the user declines
pub fn delete_callback<S, X>(page: &ListPageHandle<S, X>, noun: &'static str) -> Callback<i64>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    S::Row: PartialEq + 'static,
    S::Draft: 'static,
    X::Aux: Clone + PartialEq + 'static,
{
    let page = page.clone();
    Callback::from(move |id: i64| {
        if gloo::dialogs::confirm(&format!("Are you sure you want to delete this {}?", noun)) {
            page.delete(id);
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::Category;

    fn category(id: i64) -> Category {
        Category {
            category_id: id,
            name: Some("Tools".into()),
            description: None,
            product_count: None,
        }
    }

    #[test]
    fn test_form_mode_keys_and_ids() {
        let closed: FormMode<Category> = FormMode::Closed;
        assert!(!closed.is_open());
        assert_eq!(closed.editing_id(), None);

        assert_eq!(FormMode::<Category>::Creating.key(), "new");

        let editing = FormMode::Editing(category(5));
        assert!(editing.is_open());
        assert_eq!(editing.key(), "edit-5");
        assert_eq!(editing.editing_id(), Some(5));
    }
}
