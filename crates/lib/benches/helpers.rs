//! Shared helpers for benchmark tests

use pbxgraph::constants::STATIC_LIBRARY_PRODUCT_TYPE;
use pbxgraph::{Document, Project, ProjectOptions};

/// Builds a project with `targets` static library targets, each compiling
/// `files_per_target` sources kept in a group of its own.
pub fn generated_project(targets: usize, files_per_target: usize) -> Project {
    let mut project =
        Project::with_options(ProjectOptions::seeded(42)).expect("Failed to scaffold project");
    let main = project.main_group().expect("Failed to find main group");

    for t in 0..targets {
        let name = format!("Module{t}");
        let group = project
            .new_group(&main, &name)
            .expect("Failed to create group");
        let files: Vec<_> = (0..files_per_target)
            .map(|f| {
                project
                    .new_file(&group, &format!("{name}/File{f}.m"))
                    .expect("Failed to create file")
            })
            .collect();
        let target = project
            .new_native_target(&name, STATIC_LIBRARY_PRODUCT_TYPE)
            .expect("Failed to create target");
        project
            .add_file_references(&target, &files, None)
            .expect("Failed to add files to target");
    }

    project
}

/// The document form of [`generated_project`].
pub fn generated_document(targets: usize, files_per_target: usize) -> Document {
    generated_project(targets, files_per_target).to_document()
}

/// File names with mixed digit runs and case, in no particular order.
pub fn generated_names(count: usize) -> Vec<String> {
    (0..count)
        .map(|i| match i % 4 {
            0 => format!("File{}.m", count - i),
            1 => format!("file{i}.h"),
            2 => format!("Group {} v{}", i % 7, i),
            _ => format!(".hidden{:03}", i % 13),
        })
        .collect()
}
