use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use crate::api::errors::ApiError;
use crate::api::state::AppState;
use crate::config::PagingConfig;
use crate::domain::dto::MemberDto;
use crate::domain::errors::PagingError;
use crate::domain::member::MemberId;
use crate::domain::paging::{Order, Page, PageRequest, Sort};
use crate::domain::repositories::{CrudRepository, MemberRepository};
use crate::infrastructure::repositories::SqliteMemberRepository;

/// Query parameters of paged listings
///
/// `sort` takes the form `property[,asc|desc]`, e.g. `username,desc`.
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    pub page: Option<u32>,
    pub size: Option<u32>,
    pub sort: Option<String>,
}

impl PageParams {
    /// Resolves defaults and limits into a page request
    ///
    /// A missing or zero size falls back to the default page size; larger
    /// sizes are capped at the maximum.
    pub fn into_page_request(self, paging: &PagingConfig) -> Result<PageRequest, PagingError> {
        let size = match self.size {
            None | Some(0) => paging.default_page_size,
            Some(size) => size.min(paging.max_page_size),
        };

        let mut request = PageRequest::of(self.page.unwrap_or(0), size);

        if let Some(sort) = self.sort.as_deref().filter(|s| !s.trim().is_empty()) {
            let order: Order = sort.parse()?;
            request = request.with_sort(Sort::by(order.direction, order.property));
        }

        Ok(request)
    }
}

/// Get a member's username by ID
///
/// GET /members/:id
pub async fn find_member(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<String, ApiError> {
    let member_repo = SqliteMemberRepository::new(state.pool);
    let member = member_repo
        .find_by_id(MemberId::new(id))
        .await?
        .ok_or_else(|| ApiError::not_found(format!("Member not found: {}", id)))?;

    Ok(member.username().to_string())
}

/// List members one page at a time
///
/// GET /members?page=0&size=5&sort=username,desc
pub async fn list_members(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<Json<Page<MemberDto>>, ApiError> {
    let request = params.into_page_request(&state.paging)?;

    let member_repo = SqliteMemberRepository::new(state.pool);
    let page = member_repo.find_all_paged(request).await?;

    Ok(Json(page.map(|member| MemberDto::from(&member))))
}
