/*
Copyright 2025 Connor Nolan

Licensed under the Apache License, Version 2.0 (the "License");
you may not use this file except in compliance with the License.
You may obtain a copy of the License at

    http://www.apache.org/licenses/LICENSE-2.0

Unless required by applicable law or agreed to in writing, software
distributed under the License is distributed on an "AS IS" BASIS,
WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
See the License for the specific language governing permissions and
limitations under the License.
*/

//! Pretty-printing status messages to the console

use colored::Colorize;

/// Pretty-print an error message to the console
pub fn error(message: &str) {
    let title = "failed:".red().bold();
    eprintln!("{} {}", title, message);
}

/// Pretty-print a success message to the console
pub fn success(message: &str) {
    let title = "ok:".green().bold();
    println!("{} {}", title, message);
}
