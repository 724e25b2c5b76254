pub mod analysis;
pub mod check_in;
pub mod food_record;
pub mod health_state;
pub mod item;
pub mod item_id;
pub mod meal_type;
