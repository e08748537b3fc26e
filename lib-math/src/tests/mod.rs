mod euler_angles;
