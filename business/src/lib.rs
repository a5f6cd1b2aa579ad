pub mod application {
    pub mod receipt {
        pub mod extract_amount;
    }
    pub mod scan_session {
        pub mod controller;
    }
}

pub mod domain {
    pub mod logger;
    pub mod expense {
        pub mod form;
    }
    pub mod receipt {
        pub mod amount_extractor;
        pub mod errors;
        pub mod model;
        pub mod services;
        pub mod value_objects;
        pub mod use_cases {
            pub mod extract_amount;
        }
    }
    pub mod scan_session {
        pub mod errors;
        pub mod model;
    }
}
