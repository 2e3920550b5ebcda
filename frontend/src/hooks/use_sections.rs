use std::rc::Rc;

use inventory_client::{Dispatch, Liveness, SectionController};
use shared::{CategoryWithProducts, DashboardPage, LoadState, ReportPage};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::hooks::store::{Apply, Store};
use crate::hooks::use_api_client;
use crate::services::{AppClient, GlooTransport};

/// Reducer state plus a reload callback for read-only pages
pub struct SectionHandle<S: Apply + 'static> {
    pub page: UseReducerHandle<Store<S>>,
    pub reload: Callback<()>,
}

impl<S: Apply + 'static> SectionHandle<S> {
    pub fn state(&self) -> &S {
        &self.page.0
    }
}

type Loader<A, D> = fn(Rc<SectionController<GlooTransport, A>>, D);

/// Shared wiring for the read-only pages: a reducer, a controller bound to
/// it, a load on mount (and whenever `deps` change) and a reload callback.
#[hook]
fn use_section_page<S, D>(initial: fn() -> S, deps: D, load: Loader<S::Action, D>) -> SectionHandle<S>
where
    S: Apply + 'static,
    S::Action: 'static,
    D: PartialEq + Clone + 'static,
{
    let client: AppClient = use_api_client();
    let page = use_reducer(|| Store(initial()));
    let liveness = use_memo(deps.clone(), |_| Liveness::new());

    let controller = {
        let dispatcher = page.dispatcher();
        let liveness = (*liveness).clone();
        use_memo(deps.clone(), move |_| {
            let dispatch: Dispatch<S::Action> = Rc::new(move |action| dispatcher.dispatch(action));
            SectionController::new(client, dispatch, liveness)
        })
    };

    {
        let controller = Rc::clone(&controller);
        let liveness = Rc::clone(&liveness);
        use_effect_with(deps.clone(), move |deps| {
            load(controller, deps.clone());
            move || liveness.end()
        });
    }

    let reload = {
        let controller = Rc::clone(&controller);
        Callback::from(move |_| load(Rc::clone(&controller), deps.clone()))
    };

    SectionHandle { page, reload }
}

#[hook]
pub fn use_reports() -> SectionHandle<ReportPage> {
    use_section_page(ReportPage::default, (), |controller, _| {
        spawn_local(async move { controller.load().await })
    })
}

#[hook]
pub fn use_dashboard() -> SectionHandle<DashboardPage> {
    use_section_page(DashboardPage::loading, (), |controller, _| {
        spawn_local(async move { controller.load().await })
    })
}

#[hook]
pub fn use_category_products(category_id: i64) -> SectionHandle<LoadState<CategoryWithProducts>> {
    use_section_page(LoadState::default, category_id, |controller, id| {
        spawn_local(async move { controller.load_category(id).await })
    })
}
