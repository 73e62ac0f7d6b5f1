pub mod config;
pub mod environment;
pub mod error;

pub mod library {
    pub mod logger {
        pub mod impl_console;
        pub mod impl_memory;
        pub mod interface;
    }
    pub mod scheduler {
        pub mod impl_interval;
        pub mod impl_manual;
        pub mod interface;
    }
}

pub mod device_sensor {
    pub mod frame;
    pub mod impl_fake;
    pub mod interface;
}

pub mod device_display {
    pub mod impl_console;
    pub mod impl_fake;
    pub mod interface;
}

pub mod feature_vector {
    pub mod feature_set;
    pub mod main;
    pub mod planar;
    pub mod spatial;
}

pub mod feature_extractor {
    pub mod main;
    pub mod planar;
    pub mod spatial;
}

pub mod feature_store {
    pub mod impl_json_file;
    pub mod impl_memory;
    pub mod interface;
}

pub mod random_forest {
    pub mod confusion;
    pub mod forest;
    pub mod tree;
}

pub mod gesture_classifier {
    pub mod evaluation;
    pub mod main;
    pub mod model_store;
}

pub mod free_mode {
    pub mod main;
}
