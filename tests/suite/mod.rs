mod keyboard;
mod scenario;
mod store;
mod validation;
