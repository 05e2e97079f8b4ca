//! Room inventory endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use crate::{
    error::AppResult,
    models::{
        access::Capability,
        room::{CreateRoom, Room, RoomQuery, UpdateRoom},
    },
};

use super::Session;

/// List rooms, optionally by category (case-insensitive) and status
#[utoipa::path(
    get,
    path = "/rooms",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(RoomQuery),
    responses(
        (status = 200, description = "Rooms with their nightly rate", body = Vec<Room>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn list_rooms(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Query(query): Query<RoomQuery>,
) -> AppResult<Json<Vec<Room>>> {
    claims.require(Capability::ViewRooms)?;

    let rooms = state.services.rooms.list(&query).await?;
    Ok(Json(rooms))
}

/// Get a room
#[utoipa::path(
    get,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 200, description = "Room details", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn get_room(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<Json<Room>> {
    claims.require(Capability::ViewRooms)?;

    let room = state.services.rooms.get(id).await?;
    Ok(Json(room))
}

/// Create a room
#[utoipa::path(
    post,
    path = "/rooms",
    tag = "rooms",
    security(("bearer_auth" = [])),
    request_body = CreateRoom,
    responses(
        (status = 201, description = "Room created", body = Room),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "Room number already exists")
    )
)]
pub async fn create_room(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Json(room): Json<CreateRoom>,
) -> AppResult<(StatusCode, Json<Room>)> {
    claims.require(Capability::ManageRooms)?;
    room.validate()?;

    let created = state.services.rooms.create(room).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// Update a room
#[utoipa::path(
    put,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    request_body = UpdateRoom,
    responses(
        (status = 200, description = "Room updated", body = Room),
        (status = 404, description = "Room not found")
    )
)]
pub async fn update_room(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
    Json(room): Json<UpdateRoom>,
) -> AppResult<Json<Room>> {
    claims.require(Capability::ManageRooms)?;
    room.validate()?;

    let updated = state.services.rooms.update(id, room).await?;
    Ok(Json(updated))
}

/// Delete a room without bookings
#[utoipa::path(
    delete,
    path = "/rooms/{id}",
    tag = "rooms",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Room ID")
    ),
    responses(
        (status = 204, description = "Room deleted"),
        (status = 404, description = "Room not found"),
        (status = 409, description = "Room has bookings")
    )
)]
pub async fn delete_room(
    State(state): State<crate::AppState>,
    Session(claims): Session,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    claims.require(Capability::ManageRooms)?;

    state.services.rooms.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
