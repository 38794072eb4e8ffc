use crate::axes::{Axes, Colormap, WHITE};
use crate::error::Result;
use crate::normalize::normalize_surface;
use crate::spec::{AxesOptions, Surface3dSeries, SurfaceType};

use super::{add_labels, add_limits_xy};

/// 3D scatter points or triangulated surfaces, on white panes
pub fn render_surface(
    series: &[Surface3dSeries],
    options: &AxesOptions,
    mut axes: Axes,
) -> Result<Axes> {
    for surface in series.iter().map(normalize_surface) {
        match surface.surface_type {
            SurfaceType::Scatter => axes.scatter_3d(&surface.x, &surface.y, &surface.z, &surface.label),
            SurfaceType::Triangulated => {
                axes.plot_trisurf(&surface.x, &surface.y, &surface.z, Colormap::RdYlBu)
            }
        }
    }

    add_labels(&mut axes, options);
    axes.set_zlabel(&options.z_label);
    add_limits_xy(&mut axes, options);
    if let Some(range) = options.range_z {
        axes.set_zlim(range);
    }
    axes.set_pane_colors([WHITE; 3]);
    Ok(axes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::axes::Artist;

    #[test]
    fn test_surface_types() {
        let series = vec![
            Surface3dSeries::new(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![1.0, 2.0, 3.0]),
            Surface3dSeries::new(vec![0.0, 1.0, 0.0], vec![0.0, 0.0, 1.0], vec![1.0, 2.0, 3.0])
                .with_surface_type(SurfaceType::Triangulated),
        ];
        let options = AxesOptions {
            range_z: Some((0.0, 4.0)),
            ..AxesOptions::default()
        };
        let axes = render_surface(&series, &options, Axes::new_3d()).unwrap();
        assert!(matches!(axes.artists()[0], Artist::Scatter3D { .. }));
        match &axes.artists()[1] {
            Artist::TriSurface { triangles, colormap, .. } => {
                assert_eq!(triangles.len(), 1);
                assert_eq!(*colormap, Colormap::RdYlBu);
            }
            other => panic!("unexpected artist {:?}", other),
        }
        assert_eq!(axes.z_label(), "z");
        assert_eq!(axes.z_lim(), (0.0, 4.0));
        assert_eq!(axes.pane_colors(), Some([WHITE; 3]));
    }
}
