mod error;
mod operations;
mod requests;
mod types;

pub use error::{CityError, PersonError, CITY_NAME_MAX_LEN, PERSON_NAME_MAX_LEN};
pub use operations::{
    people_in_city, person_view, sort_cities, sort_person_views, validate_city,
    validate_person,
};
pub use requests::{SaveCityRequest, SavePersonRequest};
pub use types::{City, CityView, Person, PersonView};
