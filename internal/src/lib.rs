pub mod domain {
    pub mod envelope;
    pub mod error;
    pub mod frame;
    pub mod reading;
}

pub mod port {
    pub mod collector;
    pub mod dispatcher;
    pub mod frame_source;
}

pub mod service {
    pub mod dispatcher_service;
    pub mod frame_reader;
    pub mod ingestion_service;
    pub mod record_decoder;
    pub mod shutdown;
}
