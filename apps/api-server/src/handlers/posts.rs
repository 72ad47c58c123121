//! Post listing, detail, categories and search.

use actix_web::{HttpResponse, web};

use pressroom_core::domain::{Pagination, PostQuery};
use pressroom_shared::ApiResponse;
use pressroom_shared::dto::{ListQuery, PageQuery, SearchQuery};

use crate::handlers::views::{PostDetail, page_of, summarize};
use crate::middleware::error::AppResult;
use crate::middleware::visitor::VisitorId;
use crate::state::AppState;

const RELATED_LIMIT: usize = 3;

/// GET /api/posts?q&category&tag&page&per_page
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let filter = PostQuery {
        text: query.q,
        category_slug: query.category,
        tag: query.tag,
    };

    let posts = state.content.search(&filter).await?;
    let page = page_of(posts, Pagination::new(query.page, query.per_page));
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/posts/{slug}
pub async fn get_post(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    visitor: Option<VisitorId>,
) -> AppResult<HttpResponse> {
    let post = state.content.post_by_slug(&slug).await?;

    let (reactions, bookmarked) = match visitor {
        Some(VisitorId(visitor)) => (
            state.visitors.reactions_on(visitor, post.id).await,
            state.visitors.bookmarks(visitor).await.contains(&post.id),
        ),
        None => (Vec::new(), false),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::ok(PostDetail::new(post, reactions, bookmarked))))
}

/// GET /api/posts/{slug}/related
pub async fn related_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
) -> AppResult<HttpResponse> {
    let post = state.content.post_by_slug(&slug).await?;
    let related = state.content.related_posts(post.id, RELATED_LIMIT).await?;
    let summaries: Vec<_> = related.iter().map(summarize).collect();
    Ok(HttpResponse::Ok().json(ApiResponse::ok(summaries)))
}

/// GET /api/categories
pub async fn list_categories(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let categories = state.content.categories().await?;
    Ok(HttpResponse::Ok().json(ApiResponse::ok(categories)))
}

/// GET /api/categories/{slug}/posts
pub async fn category_posts(
    state: web::Data<AppState>,
    slug: web::Path<String>,
    query: web::Query<PageQuery>,
) -> AppResult<HttpResponse> {
    let posts = state
        .content
        .search(&PostQuery::category(slug.into_inner()))
        .await?;
    let page = page_of(posts, Pagination::new(query.page, query.per_page));
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page)))
}

/// GET /api/search?q&page&per_page
///
/// A blank query returns an empty page rather than every post.
pub async fn search(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let pagination = Pagination::new(query.page, query.per_page);

    let posts = if query.q.trim().is_empty() {
        Vec::new()
    } else {
        state.content.search(&PostQuery::text(query.q)).await?
    };
    Ok(HttpResponse::Ok().json(ApiResponse::ok(page_of(posts, pagination))))
}
