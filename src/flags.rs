use std::path::PathBuf;

xflags::xflags! {
    /// Summarize OAE activity stream pages.
    cmd oae-activity {
        /// TOML configuration file.
        optional -c, --config config: PathBuf

        /// Print the template identifier and properties of every activity.
        cmd summarize {
            /// Activity stream page as returned by /api/activity.
            required page: PathBuf
            /// Id of the user looking at the stream.
            optional --me me: String
            /// Pretty-print the output.
            optional --pretty
        }

        /// Print every activity with ordered collections and threaded comments.
        cmd prepare {
            /// Activity stream page as returned by /api/activity.
            required page: PathBuf
            /// Id of the user looking at the stream.
            optional --me me: String
            /// Pretty-print the output.
            optional --pretty
        }
    }
}
