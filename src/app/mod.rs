pub mod ports;
pub mod extract_labels_use_case;
pub mod expand_seasons_use_case;
