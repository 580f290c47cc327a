//! services/api/src/web/rest.rs
//!
//! Contains the Axum handlers for the read-only catalogue endpoints and the
//! master definition for the OpenAPI specification.

use crate::web::{
    state::AppState,
    view::{
        DiseaseSummary, DiseaseView, PlantSummary, PlantView, RemedyPanelView, SeverityName,
    },
};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use remed_lakay_core::search::filter_by_name;
use serde::Deserialize;
use std::sync::Arc;
use tracing::debug;
use utoipa::{IntoParams, OpenApi};

//=========================================================================================
// OpenAPI Master Definition
//=========================================================================================

#[derive(OpenApi)]
#[openapi(
    paths(list_plants_handler, get_plant_handler, list_diseases_handler, get_disease_handler),
    components(schemas(
        PlantSummary,
        PlantView,
        DiseaseSummary,
        DiseaseView,
        RemedyPanelView,
        SeverityName
    )),
    tags(
        (name = "Remèd Lakay API", description = "Medicinal plant and disease catalogue.")
    )
)]
pub struct ApiDoc;

//=========================================================================================
// Query Parameters
//=========================================================================================

#[derive(Deserialize, IntoParams, Debug, Default)]
pub struct SearchParams {
    /// Case-insensitive substring of the name. Everything is listed when absent.
    pub q: Option<String>,
}

//=========================================================================================
// REST API Handlers
//=========================================================================================

/// List plants, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/plants",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching plants in catalogue order", body = [PlantSummary])
    )
)]
pub async fn list_plants_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<PlantSummary>> {
    let query = params.q.unwrap_or_default();
    let plants = filter_by_name(app_state.catalogue.plants(), &query);
    debug!("Listing {} plants for query '{}'", plants.len(), query);
    Json(plants.into_iter().map(PlantSummary::from).collect())
}

/// Get one plant with its full monograph.
#[utoipa::path(
    get,
    path = "/plants/{id}",
    params(("id" = String, Path, description = "The plant's catalogue id.")),
    responses(
        (status = 200, description = "The plant", body = PlantView),
        (status = 404, description = "No plant has this id")
    )
)]
pub async fn get_plant_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<PlantView>, (StatusCode, String)> {
    app_state
        .catalogue
        .plant(&id)
        .map(|p| Json(PlantView::from(p)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown plant: {}", id)))
}

/// List diseases, optionally filtered by name.
#[utoipa::path(
    get,
    path = "/diseases",
    params(SearchParams),
    responses(
        (status = 200, description = "Matching diseases in catalogue order", body = [DiseaseSummary])
    )
)]
pub async fn list_diseases_handler(
    State(app_state): State<Arc<AppState>>,
    Query(params): Query<SearchParams>,
) -> Json<Vec<DiseaseSummary>> {
    let query = params.q.unwrap_or_default();
    let diseases = filter_by_name(app_state.catalogue.diseases(), &query);
    debug!("Listing {} diseases for query '{}'", diseases.len(), query);
    Json(diseases.into_iter().map(DiseaseSummary::from).collect())
}

/// Get one disease with its remedies, or the emergency referral for severe cases.
#[utoipa::path(
    get,
    path = "/diseases/{id}",
    params(("id" = String, Path, description = "The disease's catalogue id.")),
    responses(
        (status = 200, description = "The disease", body = DiseaseView),
        (status = 404, description = "No disease has this id")
    )
)]
pub async fn get_disease_handler(
    State(app_state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<Json<DiseaseView>, (StatusCode, String)> {
    let catalogue = &app_state.catalogue;
    catalogue
        .disease(&id)
        .map(|d| Json(DiseaseView::new(catalogue, d)))
        .ok_or_else(|| (StatusCode::NOT_FOUND, format!("Unknown disease: {}", id)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::{catalogue_file::parse_catalogue, unconfigured::UnconfiguredGateway};
    use crate::config::Config;

    fn app_state() -> Arc<AppState> {
        Arc::new(AppState {
            config: Arc::new(Config::from_lookup(|_| None).unwrap()),
            catalogue: Arc::new(parse_catalogue(include_str!("../../data/catalogue.json")).unwrap()),
            advice_adapter: Arc::new(UnconfiguredGateway),
            vision_adapter: Arc::new(UnconfiguredGateway),
        })
    }

    #[tokio::test]
    async fn listing_filters_by_name() {
        let Json(all) = list_plants_handler(State(app_state()), Query(SearchParams::default())).await;
        assert_eq!(all.len(), 3);

        let params = SearchParams {
            q: Some("lalo".into()),
        };
        let Json(found) = list_plants_handler(State(app_state()), Query(params)).await;
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "p3");
    }

    #[tokio::test]
    async fn unknown_ids_are_not_found() {
        let err = get_plant_handler(State(app_state()), Path("p404".into()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        let err = get_disease_handler(State(app_state()), Path("m404".into()))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn disease_detail_carries_its_remedies() {
        let Json(disease) = get_disease_handler(State(app_state()), Path("m3".into()))
            .await
            .unwrap();
        let RemedyPanelView::Remedies { plants } = disease.remedies else {
            panic!("expected remedies for a mild disease");
        };
        let ids: Vec<_> = plants.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["p1", "p3"]);

        let Json(diseases) = list_diseases_handler(
            State(app_state()),
            Query(SearchParams {
                q: Some("KOL".into()),
            }),
        )
        .await;
        assert_eq!(diseases.len(), 1);
        assert_eq!(diseases[0].severity, SeverityName::Severe);
    }
}
