pub mod resrobot_api_model;
pub mod timetable_record;
pub mod trip_leg;
