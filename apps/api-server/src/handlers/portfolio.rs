//! Portfolio CRUD handlers.
//!
//! Create and update take a multipart form: a `data` part carrying the JSON
//! payload plus optional `cv` and `image` file parts. Files are written to
//! the store before the database row is touched; when the database call
//! fails, the freshly written files are removed again, and on update the
//! superseded files are removed only after the row committed.

use actix_web::{HttpResponse, web};
use actix_multipart::form::{MultipartForm, json::Json as MultipartJson, tempfile::TempFile};
use uuid::Uuid;

use folio_core::domain::Portfolio;
use folio_core::ports::FileKind;
use folio_shared::dto::{CreatedPortfolioResponse, PortfolioPayload, PortfolioResponse};

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Multipart body of create and update requests.
#[derive(Debug, MultipartForm)]
pub struct PortfolioForm {
    pub data: MultipartJson<PortfolioPayload>,
    #[multipart(limit = "10MB")]
    pub cv: Option<TempFile>,
    #[multipart(limit = "10MB")]
    pub image: Option<TempFile>,
}

/// POST /api/portfolio
pub async fn create(
    state: web::Data<AppState>,
    identity: Identity,
    MultipartForm(form): MultipartForm<PortfolioForm>,
) -> AppResult<HttpResponse> {
    let payload = form.data.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    let mut portfolio = Portfolio::new(identity.user_id, payload.into_content());

    let uploads = attach_uploads(
        &state,
        identity.user_id,
        form.cv.as_ref(),
        form.image.as_ref(),
    )
    .await?;
    portfolio.cv_path = uploads.cv_path.clone();
    portfolio.image_path = uploads.image_path.clone();

    match state.portfolios.insert(portfolio).await {
        Ok(saved) => {
            tracing::info!(portfolio_id = %saved.id, user_id = %saved.user_id, "Portfolio created");
            Ok(HttpResponse::Created().json(CreatedPortfolioResponse {
                id: saved.id.to_string(),
                cv_path: saved.cv_path,
                image_path: saved.image_path,
            }))
        }
        Err(e) => {
            // The row never landed; do not leave orphaned files behind.
            remove_files(&state, &uploads.written).await;
            Err(e.into())
        }
    }
}

/// GET /api/portfolio/{id} - public
pub async fn get(state: web::Data<AppState>, path: web::Path<Uuid>) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let portfolio = state
        .portfolios
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))?;

    Ok(HttpResponse::Ok().json(PortfolioResponse::from(portfolio)))
}

/// PUT /api/portfolio/{id} - full overwrite, owner only
pub async fn update(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
    MultipartForm(form): MultipartForm<PortfolioForm>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();
    let payload = form.data.into_inner();
    payload.validate().map_err(AppError::Validation)?;

    let existing = state
        .portfolios
        .find_by_id(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Portfolio {id} not found")))?;

    // Checked again inside the repository; failing here avoids writing
    // files for a request that cannot succeed.
    if existing.user_id != identity.user_id {
        return Err(AppError::Forbidden);
    }

    let old_cv = existing.cv_path.clone();
    let old_image = existing.image_path.clone();

    let mut updated = existing;
    updated.overwrite(payload.into_content());

    let uploads = attach_uploads(
        &state,
        identity.user_id,
        form.cv.as_ref(),
        form.image.as_ref(),
    )
    .await?;

    // New files replace stored paths; absent parts keep the old attachment.
    let mut superseded = Vec::new();
    if let Some(new) = &uploads.cv_path {
        if let Some(old) = &old_cv {
            if old != new {
                superseded.push(old.clone());
            }
        }
        updated.cv_path = Some(new.clone());
    }
    if let Some(new) = &uploads.image_path {
        if let Some(old) = &old_image {
            if old != new {
                superseded.push(old.clone());
            }
        }
        updated.image_path = Some(new.clone());
    }

    match state.portfolios.update(updated, identity.user_id).await {
        Ok(saved) => {
            remove_files(&state, &superseded).await;
            Ok(HttpResponse::Ok().json(PortfolioResponse::from(saved)))
        }
        Err(e) => {
            // A re-upload under the same name overwrote the stored file in
            // place; the intact row still references that path, so it must
            // survive the cleanup.
            let written: Vec<String> = uploads
                .written
                .iter()
                .filter(|p| {
                    old_cv.as_deref() != Some(p.as_str())
                        && old_image.as_deref() != Some(p.as_str())
                })
                .cloned()
                .collect();
            remove_files(&state, &written).await;
            Err(e.into())
        }
    }
}

/// DELETE /api/portfolio/{id} - owner only; removes the row, then its files
pub async fn delete(
    state: web::Data<AppState>,
    identity: Identity,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let id = path.into_inner();

    let removed = state.portfolios.delete(id, identity.user_id).await?;

    let paths: Vec<String> = removed
        .cv_path
        .into_iter()
        .chain(removed.image_path)
        .collect();
    remove_files(&state, &paths).await;

    tracing::info!(portfolio_id = %id, "Portfolio deleted");

    Ok(HttpResponse::NoContent().finish())
}

struct UploadedPaths {
    cv_path: Option<String>,
    image_path: Option<String>,
    written: Vec<String>,
}

/// Persist whichever upload parts are present. If the second write fails,
/// the first is rolled back so the caller never sees a half-written pair.
async fn attach_uploads(
    state: &AppState,
    owner: Uuid,
    cv: Option<&TempFile>,
    image: Option<&TempFile>,
) -> AppResult<UploadedPaths> {
    let mut written: Vec<String> = Vec::new();

    let cv_path = match cv {
        Some(upload) => match store_upload(state, FileKind::Cv, owner, upload).await {
            Ok(path) => {
                written.push(path.clone());
                Some(path)
            }
            Err(e) => {
                remove_files(state, &written).await;
                return Err(e);
            }
        },
        None => None,
    };

    let image_path = match image {
        Some(upload) => match store_upload(state, FileKind::Image, owner, upload).await {
            Ok(path) => {
                written.push(path.clone());
                Some(path)
            }
            Err(e) => {
                remove_files(state, &written).await;
                return Err(e);
            }
        },
        None => None,
    };

    Ok(UploadedPaths {
        cv_path,
        image_path,
        written,
    })
}

async fn store_upload(
    state: &AppState,
    kind: FileKind,
    owner: Uuid,
    upload: &TempFile,
) -> AppResult<String> {
    let original_name = upload
        .file_name
        .clone()
        .unwrap_or_else(|| "upload".to_string());

    let bytes = tokio::fs::read(upload.file.path())
        .await
        .map_err(|e| AppError::Internal(format!("reading upload: {e}")))?;

    Ok(state.files.save(kind, owner, &original_name, &bytes).await?)
}

async fn remove_files(state: &AppState, paths: &[String]) {
    for path in paths {
        if let Err(e) = state.files.delete(path).await {
            tracing::warn!(file = %path, error = %e, "Failed to remove stored file");
        }
    }
}
