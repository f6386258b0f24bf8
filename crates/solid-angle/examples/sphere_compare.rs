//! Estimate the solid angle of a tessellated sphere seen from its centre.
//!
//! Prints, for each method, the numerical estimate next to the exact 4π, the
//! way a quick one-off comparison script would.

use nalgebra::Point3;
use solid_angle::{shapes, Method, FULL_SPHERE};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let sphere = shapes::icosphere(4, 1.0);
    let centre = Point3::origin();
    for method in Method::ALL {
        let omega = method.estimate(&sphere, centre)?;
        println!("{method} solid angle: {omega}");
        println!("exact solid angle: {FULL_SPHERE}");
    }
    Ok(())
}
