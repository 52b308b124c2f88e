//! Static site generation around the markdown converter: titles, templates,
//! and mirroring the content and static directories into the output.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::html::markdown_to_html_node;

pub const TITLE_PLACEHOLDER: &str = "{{ Title }}";
pub const CONTENT_PLACEHOLDER: &str = "{{ Content }}";

/// Text of the first `# ` heading line, without the marker.
pub fn extract_title(markdown: &str) -> Result<String> {
    markdown
        .lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
        .ok_or(Error::MissingHeading)
}

/// Render a markdown document into the template.
pub fn render_page(markdown: &str, template: &str) -> Result<String> {
    let title = extract_title(markdown)?;
    let content = markdown_to_html_node(markdown).to_html()?;
    Ok(template
        .replace(TITLE_PLACEHOLDER, &title)
        .replace(CONTENT_PLACEHOLDER, &content))
}

/// Render one markdown file with the template file into `dest`, creating
/// parent directories as needed.
pub fn generate_page(from: &Path, template_path: &Path, dest: &Path) -> Result<()> {
    let template = read(template_path)?;
    generate_with_template(from, &template, dest)
}

/// Render every `.md` file below `content_dir` into the same relative path
/// below `dest_dir`, with an `.html` extension. Returns the written paths in
/// sorted order.
pub fn generate_pages(
    content_dir: &Path,
    template_path: &Path,
    dest_dir: &Path,
) -> Result<Vec<PathBuf>> {
    let template = read(template_path)?;
    let mut written = Vec::new();

    for source in walk_files(content_dir)? {
        if source.extension().is_none_or(|ext| ext != "md") {
            log::debug!("skipping non-markdown file {}", source.display());
            continue;
        }
        let relative = source.strip_prefix(content_dir).unwrap_or(&source);
        let dest = dest_dir.join(relative).with_extension("html");
        generate_with_template(&source, &template, &dest)?;
        written.push(dest);
    }

    written.sort();
    Ok(written)
}

/// Replace `dst` with a copy of `src`. Returns the number of files copied.
pub fn copy_static(src: &Path, dst: &Path) -> Result<usize> {
    if !src.is_dir() {
        return Err(Error::MissingStaticDir(src.to_path_buf()));
    }
    if dst.exists() {
        log::debug!("clearing {}", dst.display());
        fs::remove_dir_all(dst).map_err(|source| write_error(dst, source))?;
    }
    fs::create_dir_all(dst).map_err(|source| write_error(dst, source))?;

    let files = walk_files(src)?;
    for file in &files {
        let relative = file.strip_prefix(src).unwrap_or(file);
        let target = dst.join(relative);
        create_parent(&target)?;
        fs::copy(file, &target).map_err(|source| write_error(&target, source))?;
        log::debug!("copied {} -> {}", file.display(), target.display());
    }
    Ok(files.len())
}

fn generate_with_template(from: &Path, template: &str, dest: &Path) -> Result<()> {
    log::info!("Generating page from {} to {}", from.display(), dest.display());
    let markdown = read(from)?;
    let page = render_page(&markdown, template)?;
    create_parent(dest)?;
    fs::write(dest, page).map_err(|source| write_error(dest, source))
}

/// Every regular file below `root`, depth first, using an explicit stack.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    let mut pending = vec![root.to_path_buf()];

    while let Some(dir) = pending.pop() {
        let entries = fs::read_dir(&dir).map_err(|source| read_error(&dir, source))?;
        for entry in entries {
            let path = entry.map_err(|source| read_error(&dir, source))?.path();
            if path.is_dir() {
                pending.push(path);
            } else {
                files.push(path);
            }
        }
    }

    files.sort();
    Ok(files)
}

fn read(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| read_error(path, source))
}

fn create_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) => fs::create_dir_all(parent).map_err(|source| write_error(parent, source)),
        None => Ok(()),
    }
}

fn read_error(path: &Path, source: std::io::Error) -> Error {
    Error::Read {
        path: path.to_path_buf(),
        source,
    }
}

fn write_error(path: &Path, source: std::io::Error) -> Error {
    Error::Write {
        path: path.to_path_buf(),
        source,
    }
}
