fn main() -> Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "spirv")]
    spirv::build()?;
    Ok(())
}

#[cfg(feature = "spirv")]
mod spirv {
    use glob::glob;
    use spirv_builder::{MetadataPrintout, SpirvBuilder};

    pub fn build() -> Result<(), Box<dyn std::error::Error>> {
        for path in glob("../shaders/*")?.filter_map(Result::ok) {
            SpirvBuilder::new(path.as_path(), "spirv-unknown-spv1.5")
                .print_metadata(MetadataPrintout::Full)
                .build()?;
        }
        Ok(())
    }
}
