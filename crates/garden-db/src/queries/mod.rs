pub mod harvests;
pub mod plants;
