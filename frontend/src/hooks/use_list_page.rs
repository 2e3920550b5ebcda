use std::rc::Rc;

use gloo::timers::future::TimeoutFuture;
use inventory_client::{AuxService, CrudService, Dispatch, ListController, Liveness};
use shared::{ListPage, PageAction, NOTIFICATION_TTL_MS};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::store::Store;
use crate::hooks::use_api_client;
use crate::services::AppClient;

type PageStore<S, X> = Store<ListPage<<S as CrudService>::Row, <X as AuxService>::Aux>>;

/// What a list page gets back from [`use_list_page`]
pub struct ListPageHandle<S, X>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    X::Aux: Clone,
{
    pub page: UseReducerHandle<PageStore<S, X>>,
    controller: Rc<ListController<S, X>>,
}

impl<S, X> Clone for ListPageHandle<S, X>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    X::Aux: Clone,
{
    fn clone(&self) -> Self {
        Self {
            page: self.page.clone(),
            controller: Rc::clone(&self.controller),
        }
    }
}

impl<S, X> ListPageHandle<S, X>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    S::Row: PartialEq + 'static,
    S::Draft: 'static,
    X::Aux: Clone + PartialEq + 'static,
{
    pub fn state(&self) -> &ListPage<S::Row, X::Aux> {
        &self.page.0
    }

    pub fn reload(&self) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move { controller.load().await });
    }

    /// `done` receives whether the save went through
    pub fn create(&self, draft: S::Draft, done: Callback<bool>) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move {
            let saved = controller.create(&draft).await;
            done.emit(saved);
        });
    }

    pub fn update(&self, id: i64, draft: S::Draft, done: Callback<bool>) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move {
            let saved = controller.update(id, &draft).await;
            done.emit(saved);
        });
    }

    pub fn delete(&self, id: i64) {
        let controller = Rc::clone(&self.controller);
        spawn_local(async move {
            controller.delete(id).await;
        });
    }

    pub fn dismiss(&self, id: u32) {
        self.page.dispatch(PageAction::Dismiss(id));
    }
}

/// Binds a [`ListController`] to a Yew reducer for the lifetime of the page.
///
/// Loads on mount, clears notifications after their TTL and stops applying
/// results once the page unmounts.
#[hook]
pub fn use_list_page<S, X>(build: fn(&AppClient) -> (S, X)) -> ListPageHandle<S, X>
where
    S: CrudService + 'static,
    X: AuxService + 'static,
    S::Row: PartialEq + 'static,
    S::Draft: 'static,
    X::Aux: Clone + PartialEq + 'static,
{
    let client = use_api_client();
    let page = use_reducer(PageStore::<S, X>::default);
    let liveness = use_memo((), |_| Liveness::new());

    let controller = {
        let dispatcher = page.dispatcher();
        let liveness = (*liveness).clone();
        use_memo((), move |_| {
            let (service, aux) = build(&client);
            let dispatch: Dispatch<PageAction<S::Row, X::Aux>> =
                Rc::new(move |action| dispatcher.dispatch(action));
            ListController::new(service, aux, dispatch, liveness)
        })
    };

    {
        let controller = Rc::clone(&controller);
        let liveness = Rc::clone(&liveness);
        use_effect_with((), move |_| {
            spawn_local(async move { controller.load().await });
            move || liveness.end()
        });
    }

    {
        let dispatcher = page.dispatcher();
        let liveness = Rc::clone(&liveness);
        let notification_id = page.0.notification.as_ref().map(|n| n.id);
        use_effect_with(notification_id, move |id| {
            if let Some(id) = *id {
                spawn_local(async move {
                    TimeoutFuture::new(NOTIFICATION_TTL_MS).await;
                    if liveness.is_alive() {
                        dispatcher.dispatch(PageAction::Dismiss(id));
                    }
                });
            }
            || ()
        });
    }

    ListPageHandle { page, controller }
}
