mod foodpilot;

pub use foodpilot::FoodpilotError;
