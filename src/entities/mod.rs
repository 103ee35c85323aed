pub mod booking_service_item;
pub mod camera;
pub mod medicine;
pub mod pet_health_book;
pub mod room;
pub mod room_history;
pub mod room_type;
pub mod service;
pub mod service_type;
pub mod service_variant;
pub mod treatment;

pub use booking_service_item::Entity as BookingServiceItem;
pub use camera::Entity as Camera;
pub use medicine::Entity as Medicine;
pub use pet_health_book::Entity as PetHealthBook;
pub use room::Entity as Room;
pub use room_history::Entity as RoomHistory;
pub use room_type::Entity as RoomType;
pub use service::Entity as Service;
pub use service_type::Entity as ServiceType;
pub use service_variant::Entity as ServiceVariant;
pub use treatment::Entity as Treatment;

pub mod prelude;
