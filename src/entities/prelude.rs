pub use super::{
    BookingServiceItem, Camera, Medicine, PetHealthBook, Room, RoomHistory, RoomType, Service,
    ServiceType, ServiceVariant, Treatment,
};
