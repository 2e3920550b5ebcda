use std::rc::Rc;

use shared::{DashboardPage, DetailAction, Identified, ListPage, LoadState, PageAction, ReportAction, ReportPage};
use yew::prelude::*;

/// A page-state reducer from `shared::page`
pub trait Apply: Clone {
    type Action;

    fn apply_action(&mut self, action: Self::Action);
}

impl<R: Identified + Clone, A: Clone> Apply for ListPage<R, A> {
    type Action = PageAction<R, A>;

    fn apply_action(&mut self, action: Self::Action) {
        self.apply(action);
    }
}

impl Apply for ReportPage {
    type Action = ReportAction;

    fn apply_action(&mut self, action: Self::Action) {
        self.apply(action);
    }
}

impl Apply for DashboardPage {
    type Action = DetailAction<shared::DashboardSnapshot>;

    fn apply_action(&mut self, action: Self::Action) {
        self.apply(action);
    }
}

impl<D: Clone> Apply for LoadState<D> {
    type Action = DetailAction<D>;

    fn apply_action(&mut self, action: Self::Action) {
        self.apply(action);
    }
}

/// Lets `use_reducer` drive any [`Apply`] state
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Store<S>(pub S);

impl<S: Apply> Reducible for Store<S> {
    type Action = S::Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut state = self.0.clone();
        state.apply_action(action);
        Rc::new(Store(state))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{Category, NotificationKind};

    fn category(id: i64) -> Category {
        Category {
            category_id: id,
            name: Some(format!("C{}", id)),
            description: None,
            product_count: None,
        }
    }

    #[test]
    fn test_store_reduces_list_actions() {
        let store: Rc<Store<ListPage<Category>>> = Rc::new(Store::default());
        let store = store.reduce(PageAction::Loaded(vec![category(1), category(2)]));
        let store = store.reduce(PageAction::Removed(1));
        let store = store.reduce(PageAction::Notify(NotificationKind::Success, "Category deleted successfully!".into()));

        assert_eq!(store.0.rows(), &[category(2)]);
        assert!(store.0.notification.is_some());
    }

    #[test]
    fn test_store_leaves_previous_state_untouched() {
        let before: Rc<Store<ReportPage>> = Rc::new(Store::default());
        let after = Rc::clone(&before).reduce(ReportAction::LowStock(Ok(vec![])));
        assert!(before.0.low_stock.is_loading());
        assert!(!after.0.low_stock.is_loading());
    }
}
