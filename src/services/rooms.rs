//! Room inventory service

use crate::{
    error::AppResult,
    models::room::{CreateRoom, Room, RoomQuery, UpdateRoom},
    repository::Repository,
};

#[derive(Clone)]
pub struct RoomsService {
    repository: Repository,
}

impl RoomsService {
    pub fn new(repository: Repository) -> Self {
        Self { repository }
    }

    pub async fn list(&self, query: &RoomQuery) -> AppResult<Vec<Room>> {
        self.repository.rooms.list(query).await
    }

    pub async fn get(&self, id: i32) -> AppResult<Room> {
        self.repository.rooms.get_by_id(id).await
    }

    pub async fn create(&self, room: CreateRoom) -> AppResult<Room> {
        let created = self.repository.rooms.create(&room).await?;
        tracing::info!(room_id = created.id, room_number = %created.room_number, "Room created");
        Ok(created)
    }

    pub async fn update(&self, id: i32, room: UpdateRoom) -> AppResult<Room> {
        self.repository.rooms.update(id, &room).await
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        self.repository.rooms.delete(id).await
    }
}
