use axum::{
    extract::{Path, State},
    response::Html,
    Json,
};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::info;
use uuid::Uuid;

use crate::documents::cn38::{self, Cn38Form};
use crate::documents::customs_declaration::{self, DeclarationData};
use crate::documents::customs_sheet::{self, CustomsDocumentData};
use crate::documents::shipping_label::{self, ShippingLabelData};
use crate::documents::unitizer::{self, ReceptacleContents, UnitizerForm};
use crate::documents::DocumentKind;
use crate::errors::AppError;
use crate::orders::handlers::load_order;
use crate::orders::items::{fetch_item_rows, to_line_items};
use crate::state::AppState;

fn form_or_default<T: DeserializeOwned + Default>(form: Option<Value>) -> Result<T, AppError> {
    match form {
        None | Some(Value::Null) => Ok(T::default()),
        Some(v) => serde_json::from_value(v)
            .map_err(|e| AppError::Validation(format!("invalid form fields: {e}"))),
    }
}

async fn render_document(
    state: &AppState,
    id: Uuid,
    kind: DocumentKind,
    form: Option<Value>,
) -> Result<String, AppError> {
    let cfg = &state.config;
    let order = load_order(state, id).await?;

    let html = match kind {
        DocumentKind::CustomsDeclaration => {
            let rows = fetch_item_rows(state.store.as_ref(), &order).await?;
            let items = to_line_items(&rows, &cfg.item_defaults)?;
            let data = DeclarationData::from_order(&order, items, cfg, Utc::now());
            customs_declaration::render(&data, &cfg.page_capacities)
        }
        DocumentKind::ShippingLabel => {
            shipping_label::render(&ShippingLabelData::from_order(&order, &cfg.sender))
        }
        DocumentKind::CustomsDocuments => {
            let rows = fetch_item_rows(state.store.as_ref(), &order).await?;
            let items = to_line_items(&rows, &cfg.item_defaults)?;
            customs_sheet::render(&CustomsDocumentData::from_order(&order, &items, &cfg.sender))
        }
        DocumentKind::Cn38 => {
            let form: Cn38Form = form_or_default(form)?;
            cn38::render(&form)
        }
        DocumentKind::Unitizer => {
            let form: UnitizerForm = form_or_default(form)?;
            let rows = fetch_item_rows(state.store.as_ref(), &order).await?;
            let contents = ReceptacleContents::from_rows(&rows, cfg.item_defaults.unit_weight);
            unitizer::render(&form, &cfg.sender.name_abroad, &contents)
        }
    };

    info!(order_id = %id, kind = %kind, bytes = html.len(), "document rendered");
    Ok(html)
}

/// GET /api/v1/orders/:id/documents/:kind
pub async fn handle_get_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
) -> Result<Html<String>, AppError> {
    let kind: DocumentKind = kind.parse()?;
    Ok(Html(render_document(&state, id, kind, None).await?))
}

/// POST /api/v1/orders/:id/documents/:kind
/// Body: form fields for `cn38` / `unitizer`; ignored by the other kinds.
pub async fn handle_post_document(
    State(state): State<AppState>,
    Path((id, kind)): Path<(Uuid, String)>,
    Json(form): Json<Value>,
) -> Result<Html<String>, AppError> {
    let kind: DocumentKind = kind.parse()?;
    let form = kind.takes_form().then_some(form);
    Ok(Html(render_document(&state, id, kind, form).await?))
}
