use std::path::Path;

use actix_web::{web, HttpResponse};
use restaurant_profile::source::{DirSource, RestaurantSource};

pub(super) struct ApiState {
    source: DirSource,
}

impl ApiState {
    pub(super) fn new(data_dir: &Path) -> Self {
        Self {
            source: DirSource::new(data_dir),
        }
    }
}

#[derive(serde::Serialize)]
struct ErrJsonResp {
    message: String,
}

#[derive(serde::Deserialize)]
pub(super) struct RestaurantPath {
    file: String,
}

#[actix_web::get("/data/restaurants/{file}")]
pub(super) async fn restaurant(
    data: web::Data<ApiState>,
    path: web::Path<RestaurantPath>,
) -> HttpResponse {
    let Some(slug) = path.file.strip_suffix(".json") else {
        return HttpResponse::NotFound().json(ErrJsonResp {
            message: format!("{} is not a restaurant document", path.file),
        });
    };

    match data.source.fetch(slug).await {
        Ok(doc) => HttpResponse::Ok().json(doc),
        Err(err) => {
            tracing::info!("{err:#}");
            HttpResponse::NotFound().json(ErrJsonResp {
                message: err.to_string(),
            })
        }
    }
}
