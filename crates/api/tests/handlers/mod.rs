mod availability_test;
mod middleware_test;
mod openapi_test;
mod reservation_changes_test;
mod reservations_test;
