//! Built-in example programs for the translator's source language
//!
//! Carried over from the original playground: small C programs that exercise
//! the translator's supported features (variables, pointers, structs,
//! functions, loops). `smelter examples` lists them; `smelter examples
//! <name>` prints one, ready to pipe into `smelter run -`.

/// An example program: kebab-case name, short description, source text.
pub struct Example {
    pub name: &'static str,
    pub description: &'static str,
    pub source: &'static str,
}

/// The example gallery, in display order.
pub const EXAMPLES: &[Example] = &[
    Example {
        name: "hello-world",
        description: "print a greeting",
        source: "#include <stdio.h>\nint main() {\n    printf(\"Hello, world!\\n\");\n    return 0;\n}\n",
    },
    Example {
        name: "arithmetic",
        description: "basic integer operations",
        source: "#include <stdio.h>\nint main() {\n    int a = 10;\n    int b = 5;\n    int sum = a + b;\n    int diff = a - b;\n    printf(\"Sum: %d, Diff: %d\\n\", sum, diff);\n    return 0;\n}\n",
    },
    Example {
        name: "pointers",
        description: "write through a pointer",
        source: "#include <stdio.h>\nint main() {\n    int x = 100;\n    int* ptr = &x;\n    *ptr = 200;\n    printf(\"Value of x: %d\\n\", x);\n    return 0;\n}\n",
    },
    Example {
        name: "structs",
        description: "struct field access",
        source: "#include <stdio.h>\nstruct Point {\n    int x, y;\n};\n\nint main() {\n    struct Point p = {10, 20};\n    p.x = p.x + 5;\n    printf(\"Point: (%d, %d)\\n\", p.x, p.y);\n    return 0;\n}\n",
    },
    Example {
        name: "functions",
        description: "call a user-defined function",
        source: "#include <stdio.h>\nint add(int a, int b) {\n    return a + b;\n}\n\nint main() {\n    int result = add(15, 25);\n    printf(\"Result: %d\\n\", result);\n    return 0;\n}\n",
    },
    Example {
        name: "loops",
        description: "sum the numbers 1 through 5",
        source: "#include <stdio.h>\nint main() {\n    int sum = 0;\n\n    for (int i = 1; i <= 5; i++) {\n        sum = sum + i;\n    }\n\n    printf(\"Sum: %d\\n\", sum);\n    return 0;\n}\n",
    },
];

/// Look up an example by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static Example> {
    EXAMPLES.iter().find(|e| e.name == name)
}
