use crate::codec;
use crate::tree::NaryTree;
use anyhow::{Context, Result};
use std::fs;
use std::io::BufWriter;
use std::path::Path;

pub fn save(path: &str, tree: &NaryTree) -> Result<()> {
    let file = fs::File::create(path)
        .with_context(|| format!("Failed to open file for writing: {}", path))?;
    let mut writer = BufWriter::new(file);
    codec::encode(tree, &mut writer)?;
    Ok(())
}

pub fn load(path: &str) -> Result<NaryTree> {
    let data = fs::read(path).with_context(|| format!("Failed to read file: {}", path))?;
    let tree = codec::decode(&data[..])?;
    Ok(tree)
}

pub fn exists(path: &str) -> bool {
    Path::new(path).exists()
}
