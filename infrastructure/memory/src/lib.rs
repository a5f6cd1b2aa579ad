pub mod expense_form {
    pub mod model;
    pub mod store;
}
