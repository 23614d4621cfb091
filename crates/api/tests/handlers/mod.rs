mod appointments_test;
mod health_test;
mod middleware_test;
mod slots_test;
