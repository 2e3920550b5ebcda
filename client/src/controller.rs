//! Async orchestration behind each page.
//!
//! Controllers talk to the API and describe what happened as reducer actions
//! from `shared::page`; the UI layer only has to apply them. Requests are
//! never cancelled. Once a page unmounts its [`Liveness`] flag is cleared and
//! late actions are dropped.

use std::cell::Cell;
use std::rc::Rc;

use async_trait::async_trait;
use shared::{
    Category, CategoryDraft, CategoryWithProducts, DashboardSnapshot, DetailAction, Identified, MutationAck,
    NotificationKind, PageAction, Product, ProductDraft, Purchase, PurchaseDraft, ReportAction, Sale, SaleDraft,
};

use crate::api::{CategoriesApi, ProductsApi, PurchasesApi, SalesApi};
use crate::client::ApiClient;
use crate::error::ApiError;
use crate::transport::Transport;

pub type Dispatch<A> = Rc<dyn Fn(A)>;

/// Cleared when the page that started a request goes away
#[derive(Debug, Clone)]
pub struct Liveness(Rc<Cell<bool>>);

impl Liveness {
    pub fn new() -> Self {
        Self(Rc::new(Cell::new(true)))
    }

    pub fn is_alive(&self) -> bool {
        self.0.get()
    }

    pub fn end(&self) {
        self.0.set(false);
    }
}

impl Default for Liveness {
    fn default() -> Self {
        Self::new()
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// The list/create/update/delete surface a list page needs
#[async_trait(?Send)]
pub trait CrudService {
    type Row: Identified + Clone;
    type Draft;

    /// Singular lower-case name used in messages, e.g. `product`
    fn noun(&self) -> &'static str;

    async fn list(&self) -> Result<Vec<Self::Row>, ApiError>;

    async fn create(&self, draft: &Self::Draft) -> Result<MutationAck, ApiError>;

    async fn update(&self, _id: i64, _draft: &Self::Draft) -> Result<MutationAck, ApiError> {
        Err(ApiError::Rejected(format!("A {} cannot be edited", self.noun())))
    }

    async fn delete(&self, _id: i64) -> Result<MutationAck, ApiError> {
        Err(ApiError::Rejected(format!("A {} cannot be deleted", self.noun())))
    }

    fn created_message(&self) -> String {
        format!("{} created successfully!", capitalize(self.noun()))
    }
}

/// Side data a list page loads next to its rows
#[async_trait(?Send)]
pub trait AuxService {
    type Aux: Default;

    fn label(&self) -> &'static str;

    async fn load(&self) -> Result<Self::Aux, ApiError>;
}

/// For pages without side data
pub struct NoAux;

#[async_trait(?Send)]
impl AuxService for NoAux {
    type Aux = ();

    fn label(&self) -> &'static str {
        "nothing"
    }

    async fn load(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[async_trait(?Send)]
impl<T: Transport> CrudService for ProductsApi<T> {
    type Row = Product;
    type Draft = ProductDraft;

    fn noun(&self) -> &'static str {
        "product"
    }

    async fn list(&self) -> Result<Vec<Product>, ApiError> {
        ProductsApi::list(self).await
    }

    async fn create(&self, draft: &ProductDraft) -> Result<MutationAck, ApiError> {
        ProductsApi::create(self, draft).await
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<MutationAck, ApiError> {
        ProductsApi::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<MutationAck, ApiError> {
        ProductsApi::delete(self, id).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> CrudService for CategoriesApi<T> {
    type Row = Category;
    type Draft = CategoryDraft;

    fn noun(&self) -> &'static str {
        "category"
    }

    async fn list(&self) -> Result<Vec<Category>, ApiError> {
        CategoriesApi::list(self).await
    }

    async fn create(&self, draft: &CategoryDraft) -> Result<MutationAck, ApiError> {
        CategoriesApi::create(self, draft).await
    }

    async fn update(&self, id: i64, draft: &CategoryDraft) -> Result<MutationAck, ApiError> {
        CategoriesApi::update(self, id, draft).await
    }

    async fn delete(&self, id: i64) -> Result<MutationAck, ApiError> {
        CategoriesApi::delete(self, id).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> CrudService for PurchasesApi<T> {
    type Row = Purchase;
    type Draft = PurchaseDraft;

    fn noun(&self) -> &'static str {
        "purchase"
    }

    async fn list(&self) -> Result<Vec<Purchase>, ApiError> {
        PurchasesApi::list(self).await
    }

    async fn create(&self, draft: &PurchaseDraft) -> Result<MutationAck, ApiError> {
        PurchasesApi::create(self, draft).await
    }

    fn created_message(&self) -> String {
        "Purchase recorded successfully!".to_string()
    }
}

#[async_trait(?Send)]
impl<T: Transport> CrudService for SalesApi<T> {
    type Row = Sale;
    type Draft = SaleDraft;

    fn noun(&self) -> &'static str {
        "sale"
    }

    async fn list(&self) -> Result<Vec<Sale>, ApiError> {
        SalesApi::list(self).await
    }

    async fn create(&self, draft: &SaleDraft) -> Result<MutationAck, ApiError> {
        SalesApi::create(self, draft).await
    }

    fn created_message(&self) -> String {
        "Sale recorded successfully!".to_string()
    }
}

#[async_trait(?Send)]
impl<T: Transport> AuxService for CategoriesApi<T> {
    type Aux = Vec<Category>;

    fn label(&self) -> &'static str {
        "categories"
    }

    async fn load(&self) -> Result<Vec<Category>, ApiError> {
        CategoriesApi::list(self).await
    }
}

#[async_trait(?Send)]
impl<T: Transport> AuxService for ProductsApi<T> {
    type Aux = Vec<Product>;

    fn label(&self) -> &'static str {
        "products"
    }

    async fn load(&self) -> Result<Vec<Product>, ApiError> {
        ProductsApi::list(self).await
    }
}

/// Drives one entity list page
pub struct ListController<S: CrudService, X: AuxService = NoAux> {
    service: S,
    aux: X,
    dispatch: Dispatch<PageAction<S::Row, X::Aux>>,
    liveness: Liveness,
}

impl<S: CrudService, X: AuxService> ListController<S, X> {
    pub fn new(service: S, aux: X, dispatch: Dispatch<PageAction<S::Row, X::Aux>>, liveness: Liveness) -> Self {
        Self {
            service,
            aux,
            dispatch,
            liveness,
        }
    }

    fn emit(&self, action: PageAction<S::Row, X::Aux>) {
        if self.liveness.is_alive() {
            (self.dispatch)(action);
        } else {
            log::debug!("{} page is gone, dropping update", self.service.noun());
        }
    }

    fn notify(&self, kind: NotificationKind, message: String) {
        self.emit(PageAction::Notify(kind, message));
    }

    /// Initial load and manual retry: rows and side data in parallel
    pub async fn load(&self) {
        self.emit(PageAction::LoadStarted);
        let (rows, aux) = futures::join!(self.service.list(), self.aux.load());

        match rows {
            Ok(rows) => self.emit(PageAction::Loaded(rows)),
            Err(err) => {
                log::error!("Failed to load {} list: {}", self.service.noun(), err);
                self.emit(PageAction::LoadFailed(format!(
                    "Failed to load data. {}",
                    err.user_message()
                )));
            }
        }
        self.apply_aux(aux);
    }

    fn apply_aux(&self, aux: Result<X::Aux, ApiError>) {
        match aux {
            Ok(aux) => self.emit(PageAction::AuxLoaded(aux)),
            Err(err) => {
                log::warn!("Failed to load {}: {}", self.aux.label(), err);
                self.emit(PageAction::AuxLoaded(X::Aux::default()));
                self.notify(
                    NotificationKind::Warning,
                    format!("Could not load {}. {}", self.aux.label(), err.user_message()),
                );
            }
        }
    }

    /// Refetch after a mutation; the current rows stay up while it runs
    async fn refresh(&self) {
        let (rows, aux) = futures::join!(self.service.list(), self.aux.load());
        match rows {
            Ok(rows) => self.emit(PageAction::Refreshed(rows)),
            Err(err) => {
                log::error!("Failed to refresh {} list: {}", self.service.noun(), err);
                self.notify(
                    NotificationKind::Error,
                    format!("Saved, but the list could not be refreshed. {}", err.user_message()),
                );
            }
        }
        if let Ok(aux) = aux {
            self.emit(PageAction::AuxLoaded(aux));
        }
    }

    fn failed(&self, verb: &str, err: &ApiError) {
        log::error!("Failed to {} {}: {}", verb, self.service.noun(), err);
        self.notify(
            NotificationKind::Error,
            format!("Failed to {} {}. {}", verb, self.service.noun(), err.user_message()),
        );
    }

    /// Returns whether the backend accepted the new row
    pub async fn create(&self, draft: &S::Draft) -> bool {
        match self.service.create(draft).await {
            Ok(_) => {
                self.notify(NotificationKind::Success, self.service.created_message());
                self.refresh().await;
                true
            }
            Err(err) => {
                self.failed("create", &err);
                false
            }
        }
    }

    pub async fn update(&self, id: i64, draft: &S::Draft) -> bool {
        match self.service.update(id, draft).await {
            Ok(_) => {
                self.notify(
                    NotificationKind::Success,
                    format!("{} updated successfully!", capitalize(self.service.noun())),
                );
                self.refresh().await;
                true
            }
            Err(err) => {
                self.failed("update", &err);
                false
            }
        }
    }

    /// A successful delete drops the row locally without a refetch
    pub async fn delete(&self, id: i64) -> bool {
        match self.service.delete(id).await {
            Ok(_) => {
                self.emit(PageAction::Removed(id));
                self.notify(
                    NotificationKind::Success,
                    format!("{} deleted successfully!", capitalize(self.service.noun())),
                );
                true
            }
            Err(err) => {
                self.failed("delete", &err);
                false
            }
        }
    }
}

/// Loads pages made of independent read-only sections
pub struct SectionController<T, A> {
    client: ApiClient<T>,
    dispatch: Dispatch<A>,
    liveness: Liveness,
}

impl<T: Transport, A> SectionController<T, A> {
    pub fn new(client: ApiClient<T>, dispatch: Dispatch<A>, liveness: Liveness) -> Self {
        Self {
            client,
            dispatch,
            liveness,
        }
    }

    fn emit(&self, action: A) {
        if self.liveness.is_alive() {
            (self.dispatch)(action);
        }
    }
}

fn section_error(section: &str, err: ApiError) -> String {
    log::error!("Failed to load {}: {}", section, err);
    err.user_message()
}

impl<T: Transport> SectionController<T, ReportAction> {
    /// Each report section resolves on its own; one failing leaves the
    /// others intact
    pub async fn load(&self) {
        self.emit(ReportAction::LoadStarted);
        let dashboard = self.client.dashboard();

        let sales_by_category = async {
            let result = dashboard
                .sales_by_category()
                .await
                .map_err(|e| section_error("sales by category", e));
            self.emit(ReportAction::SalesByCategory(result));
        };
        let top_selling = async {
            let result = dashboard
                .top_selling()
                .await
                .map_err(|e| section_error("top selling products", e));
            self.emit(ReportAction::TopSelling(result));
        };
        let low_stock = async {
            let result = dashboard
                .low_stock()
                .await
                .map_err(|e| section_error("low stock products", e));
            self.emit(ReportAction::LowStock(result));
        };

        futures::join!(sales_by_category, top_selling, low_stock);
    }
}

impl<T: Transport> SectionController<T, DetailAction<DashboardSnapshot>> {
    pub async fn load(&self) {
        self.emit(DetailAction::LoadStarted);
        match self.client.dashboard().overview().await {
            Ok(snapshot) => self.emit(DetailAction::Loaded(snapshot)),
            Err(err) => {
                section_error("dashboard", err);
                self.emit(DetailAction::LoadFailed(
                    "Failed to load dashboard data. Please try again later.".to_string(),
                ));
            }
        }
    }
}

impl<T: Transport> SectionController<T, DetailAction<CategoryWithProducts>> {
    pub async fn load_category(&self, category_id: i64) {
        self.emit(DetailAction::LoadStarted);
        match self.client.categories().products_in_category(category_id).await {
            Ok(detail) => self.emit(DetailAction::Loaded(detail)),
            Err(err) => {
                section_error("category products", err);
                self.emit(DetailAction::LoadFailed(
                    "Failed to load category details. Please try again later.".to_string(),
                ));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::testing::{ack, ok, status, MockTransport};
    use crate::transport::{Method, TransportError};
    use serde_json::{json, Value};
    use shared::{DashboardPage, ListPage, LoadState, ReportPage};
    use std::cell::RefCell;

    type ProductPage = ListPage<Product, Vec<Category>>;

    /// A tiny in-memory backend for `/products` and `/categories/`
    fn backend(products: Rc<RefCell<Vec<Value>>>, categories_up: bool) -> MockTransport {
        MockTransport::new(move |req| {
            let path = req.url.trim_start_matches(crate::config::DEFAULT_BASE_URL);
            match (req.method, path) {
                (Method::Get, "/products") => ok(Value::Array(products.borrow().clone())),
                (Method::Get, "/categories/") if categories_up => ok(json!([{"category_id": 1, "name": "Tools"}])),
                (Method::Get, "/categories/") => status(500, json!({"success": false, "error": "db"})),
                (Method::Put, "/products/1") => {
                    products.borrow_mut()[0]["name"] = json!("Renamed");
                    ack("product_id", 1)
                }
                (Method::Delete, "/products/2") => ack("product_id", 2),
                (Method::Delete, _) => status(400, json!({"success": false, "error": "Product has sales"})),
                _ => Err(TransportError::Network("unexpected".into())),
            }
        })
    }

    fn seed() -> Rc<RefCell<Vec<Value>>> {
        Rc::new(RefCell::new(vec![
            json!({"product_id": 1, "name": "Hammer", "category_id": 1, "price": 10}),
            json!({"product_id": 2, "name": "Saw", "category_id": 1, "price": 20}),
        ]))
    }

    fn product_controller(
        transport: &MockTransport,
        liveness: Liveness,
    ) -> (
        ListController<ProductsApi<MockTransport>, CategoriesApi<MockTransport>>,
        Rc<RefCell<Vec<PageAction<Product, Vec<Category>>>>>,
    ) {
        let client = ApiClient::new(transport.clone(), ClientConfig::default());
        let actions = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&actions);
        let controller = ListController::new(
            client.products(),
            client.categories(),
            Rc::new(move |action: PageAction<Product, Vec<Category>>| sink.borrow_mut().push(action)),
            liveness,
        );
        (controller, actions)
    }

    fn replay(actions: &[PageAction<Product, Vec<Category>>]) -> ProductPage {
        let mut page = ProductPage::default();
        for action in actions {
            page.apply(action.clone());
        }
        page
    }

    fn gets(transport: &MockTransport) -> usize {
        transport.sent().iter().filter(|r| r.method == Method::Get).count()
    }

    #[tokio::test]
    async fn test_load_fetches_rows_and_categories() {
        let transport = backend(seed(), true);
        let (controller, actions) = product_controller(&transport, Liveness::new());

        controller.load().await;
        let page = replay(&actions.borrow());
        assert_eq!(page.rows().len(), 2);
        assert_eq!(page.aux.len(), 1);
        assert!(page.notification.is_none());
    }

    #[tokio::test]
    async fn test_category_failure_leaves_aux_empty_with_warning() {
        let transport = backend(seed(), false);
        let (controller, actions) = product_controller(&transport, Liveness::new());

        controller.load().await;
        let page = replay(&actions.borrow());
        assert_eq!(page.rows().len(), 2);
        assert!(page.aux.is_empty());
        assert_eq!(page.notification.map(|n| n.kind), Some(NotificationKind::Warning));
    }

    #[tokio::test]
    async fn test_delete_filters_locally_without_refetch() {
        let transport = backend(seed(), true);
        let (controller, actions) = product_controller(&transport, Liveness::new());
        controller.load().await;
        let before = gets(&transport);

        assert!(controller.delete(2).await);
        assert_eq!(gets(&transport), before);

        let page = replay(&actions.borrow());
        assert_eq!(page.rows().iter().map(|p| p.product_id).collect::<Vec<_>>(), vec![1]);
        assert_eq!(page.notification.map(|n| n.kind), Some(NotificationKind::Success));
    }

    #[tokio::test]
    async fn test_update_refetches_without_loading_state() {
        let transport = backend(seed(), true);
        let (controller, actions) = product_controller(&transport, Liveness::new());
        controller.load().await;
        actions.borrow_mut().clear();
        let before = gets(&transport);

        let draft = ProductDraft {
            name: "Renamed".into(),
            category_id: 1,
            price: 10.0,
            quantity: 0,
            reorder_level: 10,
        };
        assert!(controller.update(1, &draft).await);
        assert!(gets(&transport) > before);

        let emitted = actions.borrow();
        assert!(!emitted.iter().any(|a| matches!(a, PageAction::LoadStarted)));
        let rows = emitted.iter().find_map(|a| match a {
            PageAction::Refreshed(rows) => Some(rows.clone()),
            _ => None,
        });
        assert_eq!(rows.unwrap()[0].name.as_deref(), Some("Renamed"));
    }

    #[tokio::test]
    async fn test_failed_delete_keeps_rows() {
        let transport = backend(seed(), true);
        let (controller, actions) = product_controller(&transport, Liveness::new());
        controller.load().await;

        assert!(!controller.delete(1).await);
        let page = replay(&actions.borrow());
        assert_eq!(page.rows().len(), 2);
        let notification = page.notification.unwrap();
        assert_eq!(notification.kind, NotificationKind::Error);
        assert_eq!(notification.message, "Failed to delete product. Product has sales");
    }

    #[tokio::test]
    async fn test_actions_dropped_after_unmount() {
        let transport = backend(seed(), true);
        let liveness = Liveness::new();
        let (controller, actions) = product_controller(&transport, liveness.clone());

        liveness.end();
        controller.load().await;
        assert!(actions.borrow().is_empty());
        assert!(transport.count() > 0);
    }

    #[tokio::test]
    async fn test_sales_cannot_be_edited() {
        let transport = MockTransport::new(|_| ok(json!([])));
        let client = ApiClient::new(transport.clone(), ClientConfig::default());
        let sales = client.sales();
        let draft = SaleDraft { product_id: 1, quantity: 1, sale_price: 1.0 };

        assert!(matches!(CrudService::update(&sales, 1, &draft).await, Err(ApiError::Rejected(_))));
        assert_eq!(transport.count(), 0);
        assert_eq!(sales.created_message(), "Sale recorded successfully!");
    }

    #[tokio::test]
    async fn test_report_sections_fail_independently() {
        let transport = MockTransport::new(|req| {
            if req.url.ends_with("/dashboard/top-selling") {
                ok(json!([{"product_name": "Hammer", "total_quantity_sold": 4, "total_revenue": 40}]))
            } else if req.url.ends_with("/dashboard/low-stock") {
                ok(json!([]))
            } else {
                Err(TransportError::Timeout)
            }
        });
        let client = ApiClient::new(transport, ClientConfig::default());
        let report = Rc::new(RefCell::new(ReportPage::default()));
        let sink = Rc::clone(&report);
        let dispatch: Dispatch<ReportAction> = Rc::new(move |action| sink.borrow_mut().apply(action));
        let controller = SectionController::new(client, dispatch, Liveness::new());

        controller.load().await;
        let report = report.borrow();
        assert!(report.sales_by_category.error().is_some());
        assert_eq!(report.top_selling.data().map(|rows| rows[0].total_sales), Some(40.0));
        assert!(matches!(report.low_stock, LoadState::Ready(_)));
        assert_eq!(report.banner(), None);
    }

    #[tokio::test]
    async fn test_dashboard_failure_renders_empty_snapshot() {
        let transport = MockTransport::new(|_| status(500, json!({"success": false, "error": "boom"})));
        let client = ApiClient::new(transport, ClientConfig::default());
        let page = Rc::new(RefCell::new(DashboardPage::loading()));
        let sink = Rc::clone(&page);
        let dispatch: Dispatch<DetailAction<DashboardSnapshot>> =
            Rc::new(move |action| sink.borrow_mut().apply(action));
        let controller = SectionController::new(client, dispatch, Liveness::new());

        controller.load().await;
        let page = page.borrow();
        assert!(!page.loading);
        assert_eq!(page.snapshot, DashboardSnapshot::default());
        assert_eq!(
            page.error.as_deref(),
            Some("Failed to load dashboard data. Please try again later.")
        );
    }

    #[tokio::test]
    async fn test_category_products_detail() {
        let transport = MockTransport::new(|_| {
            ok(json!({"category_id": 3, "name": "Tools", "products": [{"product_id": 1, "name": "Hammer"}]}))
        });
        let client = ApiClient::new(transport, ClientConfig::default());
        let state = Rc::new(RefCell::new(LoadState::<CategoryWithProducts>::Loading));
        let sink = Rc::clone(&state);
        let dispatch: Dispatch<DetailAction<CategoryWithProducts>> =
            Rc::new(move |action| sink.borrow_mut().apply(action));
        let controller = SectionController::new(client, dispatch, Liveness::new());

        controller.load_category(3).await;
        let state = state.borrow();
        let detail = state.data().unwrap();
        assert_eq!(detail.category.name.as_deref(), Some("Tools"));
        assert_eq!(detail.products.len(), 1);
    }
}
