pub mod galaxy_cloud;
