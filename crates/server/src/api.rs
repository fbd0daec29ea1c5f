use std::collections::BTreeMap;
use std::sync::Arc;

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::extract::{FromRequest, FromRequestParts, Path, Query, Request, State};
use axum::http::request::Parts;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use rust_decimal::Decimal;
use savora_core::{
    health_scores, tag_set, AdaptedRecipe, ApplicationError, Cookbook, Difficulty, DomainError,
    Interaction, InteractionAction, InterfaceError, Modification, ModificationGoal,
    NutritionComparison, NutritionTargets, PreferenceUpdate, ProfileInsights, Recipe,
    RecipeNutrition, RecipeQuery, SubstitutionConstraints, SubstitutionRule, TagSet, UserProfile,
};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use uuid::Uuid;

use crate::health;
use crate::sessions::{ProfileRepository, RepositoryError, SessionId};

#[derive(Clone)]
pub struct AppState {
    pub cookbook: Cookbook,
    pub profiles: Arc<dyn ProfileRepository>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/recipes", get(list_recipes))
        .route("/recipes/{name}", get(get_recipe))
        .route("/recipes/{name}/nutrition", get(recipe_nutrition))
        .route("/compare", get(compare_recipes))
        .route("/substitutions/{ingredient}", get(substitutions))
        .route("/sessions", post(create_session))
        .route("/sessions/{id}", get(get_session).delete(end_session))
        .route("/sessions/{id}/preferences", put(update_preferences))
        .route("/sessions/{id}/interactions", post(record_interaction))
        .route("/sessions/{id}/recipes/{name}", get(personalized_recipe))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

#[derive(Debug)]
pub struct ApiError(InterfaceError);

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub correlation_id: String,
}

impl From<ApplicationError> for ApiError {
    fn from(value: ApplicationError) -> Self {
        Self(value.into_interface(Uuid::new_v4().to_string()))
    }
}

impl From<DomainError> for ApiError {
    fn from(value: DomainError) -> Self {
        Self::from(ApplicationError::from(value))
    }
}

impl From<RepositoryError> for ApiError {
    fn from(value: RepositoryError) -> Self {
        Self(InterfaceError::Internal {
            message: value.to_string(),
            correlation_id: Uuid::new_v4().to_string(),
        })
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            InterfaceError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            InterfaceError::NotFound { .. } => StatusCode::NOT_FOUND,
            InterfaceError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        warn!(
            event_name = "api.request.failed",
            correlation_id = %self.0.correlation_id(),
            status = status.as_u16(),
            error = %self.0,
            "request failed"
        );

        let body = ErrorBody {
            error: self.0.user_message().to_string(),
            message: self.0.message().to_string(),
            correlation_id: self.0.correlation_id().to_string(),
        };
        (status, Json(body)).into_response()
    }
}

impl ApiError {
    fn bad_request(message: String) -> Self {
        Self(InterfaceError::BadRequest { message, correlation_id: Uuid::new_v4().to_string() })
    }
}

impl From<QueryRejection> for ApiError {
    fn from(value: QueryRejection) -> Self {
        Self::bad_request(value.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(value: JsonRejection) -> Self {
        Self::bad_request(value.body_text())
    }
}

type ApiResult<T> = Result<T, ApiError>;

/// `Query` whose rejections render as [`ErrorBody`] like every other failure.
pub struct ApiQuery<T>(pub T);

impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state).await?;
        Ok(Self(value))
    }
}

/// `Json` whose rejections render as [`ErrorBody`] like every other failure.
pub struct ApiJson<T>(pub T);

impl<T, S> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(request: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(request, state).await?;
        Ok(Self(value))
    }
}

// ---------------------------------------------------------------------------
// Recipes
// ---------------------------------------------------------------------------

/// Query-string form of the predicate set; tag lists are comma-separated.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RecipeParams {
    pub q: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    pub dietary: Option<String>,
    pub health: Option<String>,
    pub max_time: Option<u32>,
    pub ingredients: Option<String>,
    pub session: Option<String>,
}

impl RecipeParams {
    fn to_query(&self) -> Result<RecipeQuery, DomainError> {
        let mut query = RecipeQuery {
            dietary_tags: split_tags(self.dietary.as_deref()),
            health_conditions: split_tags(self.health.as_deref()),
            max_cooking_time: self.max_time,
            ..RecipeQuery::default()
        };
        if let Some(cuisine) = &self.cuisine {
            query = query.cuisine(cuisine.as_str());
        }
        if let Some(difficulty) = &self.difficulty {
            query = query.difficulty(difficulty.parse::<Difficulty>()?);
        }
        if let Some(text) = &self.q {
            query = query.text(text.as_str());
        }
        for ingredient in split_list(self.ingredients.as_deref()) {
            query = query.required_ingredient(ingredient);
        }
        Ok(query)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeSummary {
    pub name: String,
    pub cuisine: String,
    pub difficulty: Difficulty,
    pub cooking_time_minutes: u32,
    pub servings: u32,
    pub dietary_tags: TagSet,
    pub health_conditions: TagSet,
    pub relevance: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub personalization: Option<f64>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeList {
    pub count: usize,
    pub results: Vec<RecipeSummary>,
}

async fn list_recipes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<RecipeParams>,
) -> ApiResult<Json<RecipeList>> {
    let query = params.to_query()?;

    let profile = match params.session.as_deref() {
        Some(raw) => Some(load_profile(&state, &raw.parse::<SessionId>()?).await?),
        None => None,
    };

    let matches = match &profile {
        Some(profile) => state.cookbook.search_for_profile(query, profile),
        None => state.cookbook.search(&query),
    };

    let results: Vec<RecipeSummary> = matches
        .iter()
        .map(|hit| RecipeSummary {
            name: hit.recipe.name.clone(),
            cuisine: hit.recipe.cuisine.clone(),
            difficulty: hit.recipe.difficulty,
            cooking_time_minutes: hit.recipe.cooking_time_minutes,
            servings: hit.recipe.servings,
            dietary_tags: hit.recipe.dietary_tags.clone(),
            health_conditions: hit.recipe.health_conditions.clone(),
            relevance: hit.relevance,
            personalization: hit.personalization,
            reasons: profile
                .as_ref()
                .map(|profile| profile.explain(hit.recipe))
                .unwrap_or_default(),
        })
        .collect();

    Ok(Json(RecipeList { count: results.len(), results }))
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RecipeDetail {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub health_scores: BTreeMap<String, f64>,
}

async fn get_recipe(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> ApiResult<Json<RecipeDetail>> {
    let recipe = state.cookbook.recipe(&name)?;
    Ok(Json(RecipeDetail {
        recipe: recipe.clone(),
        health_scores: health_scores(&recipe.nutrition),
    }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NutritionParams {
    pub servings: Option<i64>,
    pub goals: Option<String>,
    /// Comma-separated modification goals, e.g. `reduce-sodium,increase-fiber`.
    pub improve: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NutritionView {
    #[serde(flatten)]
    pub report: RecipeNutrition,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub modifications: Vec<Modification>,
}

async fn recipe_nutrition(
    State(state): State<AppState>,
    Path(name): Path<String>,
    ApiQuery(params): ApiQuery<NutritionParams>,
) -> ApiResult<Json<NutritionView>> {
    let goals = split_tags(params.goals.as_deref());
    let improve = split_list(params.improve.as_deref())
        .map(str::parse::<ModificationGoal>)
        .collect::<Result<Vec<_>, _>>()?;

    let report = state.cookbook.nutrition(&name, params.servings.map(Decimal::from), &goals)?;
    let modifications = state.cookbook.suggest_modifications(&name, &improve)?;
    Ok(Json(NutritionView { report, modifications }))
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct CompareParams {
    /// Comma-separated recipe names.
    pub recipes: Option<String>,
}

async fn compare_recipes(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<CompareParams>,
) -> ApiResult<Json<NutritionComparison>> {
    let names: Vec<&str> = split_list(params.recipes.as_deref()).collect();
    Ok(Json(state.cookbook.compare(&names)?))
}

// ---------------------------------------------------------------------------
// Substitutions
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct SubstitutionParams {
    pub dietary: Option<String>,
    pub health: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SubstitutionList {
    pub ingredient: String,
    pub matched: Option<String>,
    pub substitutes: Vec<SubstitutionRule>,
}

async fn substitutions(
    State(state): State<AppState>,
    Path(ingredient): Path<String>,
    ApiQuery(params): ApiQuery<SubstitutionParams>,
) -> Json<SubstitutionList> {
    let constraints = SubstitutionConstraints {
        dietary_tags: split_tags(params.dietary.as_deref()),
        health_conditions: split_tags(params.health.as_deref()),
    };

    let substitutes =
        state.cookbook.substitute(&ingredient, &constraints).into_iter().cloned().collect();
    let matched = state.cookbook.substitutions().resolve(&ingredient).map(str::to_string);

    Json(SubstitutionList { ingredient: ingredient.trim().to_string(), matched, substitutes })
}

// ---------------------------------------------------------------------------
// Sessions
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize, Deserialize)]
pub struct SessionView {
    pub session_id: SessionId,
    pub profile: UserProfile,
    pub insights: ProfileInsights,
    pub nutrition_targets: NutritionTargets,
    #[serde(default)]
    pub dietary_recommendations: Vec<String>,
}

impl SessionView {
    fn new(session_id: SessionId, profile: UserProfile) -> Self {
        Self {
            session_id,
            insights: profile.insights(),
            nutrition_targets: profile.nutrition_targets(),
            dietary_recommendations: profile.dietary_recommendations(),
            profile,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct InteractionRequest {
    pub recipe: String,
    #[serde(flatten)]
    pub action: InteractionAction,
}

async fn create_session(
    State(state): State<AppState>,
) -> ApiResult<(StatusCode, Json<SessionView>)> {
    let session_id = SessionId::generate();
    state.profiles.save(session_id, UserProfile::new()).await?;

    info!(
        event_name = "api.session.created",
        correlation_id = %session_id,
        session_id = %session_id,
        "session created"
    );
    Ok((StatusCode::CREATED, Json(SessionView::new(session_id, UserProfile::new()))))
}

async fn get_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<SessionView>> {
    let session_id = id.parse::<SessionId>()?;
    let profile = load_profile(&state, &session_id).await?;
    Ok(Json(SessionView::new(session_id, profile)))
}

async fn end_session(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<StatusCode> {
    let session_id = id.parse::<SessionId>()?;
    if !state.profiles.delete(&session_id).await? {
        return Err(ApplicationError::SessionNotFound(session_id.to_string()).into());
    }

    info!(
        event_name = "api.session.ended",
        correlation_id = %session_id,
        session_id = %session_id,
        "session ended"
    );
    Ok(StatusCode::NO_CONTENT)
}

async fn update_preferences(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(update): ApiJson<PreferenceUpdate>,
) -> ApiResult<Json<SessionView>> {
    let session_id = id.parse::<SessionId>()?;
    let mut profile = load_profile(&state, &session_id).await?;

    profile.apply(update);
    state.profiles.save(session_id, profile.clone()).await?;

    info!(
        event_name = "api.session.preferences_updated",
        correlation_id = %session_id,
        session_id = %session_id,
        dietary_restrictions = profile.dietary_restrictions.len(),
        health_conditions = profile.health_conditions.len(),
        spice_level = %profile.spice_level,
        allergens = profile.allergens.len(),
        cooking_skill = %profile.cooking_skill,
        "session preferences updated"
    );
    Ok(Json(SessionView::new(session_id, profile)))
}

async fn record_interaction(
    State(state): State<AppState>,
    Path(id): Path<String>,
    ApiJson(request): ApiJson<InteractionRequest>,
) -> ApiResult<(StatusCode, Json<Interaction>)> {
    let session_id = id.parse::<SessionId>()?;
    let mut profile = load_profile(&state, &session_id).await?;

    let interaction =
        state.cookbook.record_interaction(&mut profile, &request.recipe, request.action)?;
    state.profiles.save(session_id, profile).await?;

    info!(
        event_name = "api.session.interaction_recorded",
        correlation_id = %session_id,
        session_id = %session_id,
        recipe = %interaction.recipe_id,
        action = interaction.action.name(),
        "interaction recorded"
    );
    Ok((StatusCode::CREATED, Json(interaction)))
}

/// A recipe adapted to the session's restrictions, allergens, spice level and
/// cooking skill.
async fn personalized_recipe(
    State(state): State<AppState>,
    Path((id, name)): Path<(String, String)>,
) -> ApiResult<Json<AdaptedRecipe>> {
    let session_id = id.parse::<SessionId>()?;
    let profile = load_profile(&state, &session_id).await?;
    Ok(Json(state.cookbook.adapt(&name, &profile)?))
}

async fn load_profile(state: &AppState, session_id: &SessionId) -> ApiResult<UserProfile> {
    state
        .profiles
        .find_by_id(session_id)
        .await?
        .ok_or_else(|| ApiError::from(ApplicationError::SessionNotFound(session_id.to_string())))
}

fn split_list(raw: Option<&str>) -> impl Iterator<Item = &str> {
    raw.unwrap_or_default().split(',').map(str::trim).filter(|item| !item.is_empty())
}

fn split_tags(raw: Option<&str>) -> TagSet {
    tag_set(split_list(raw))
}
