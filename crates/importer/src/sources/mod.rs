pub mod mso;
